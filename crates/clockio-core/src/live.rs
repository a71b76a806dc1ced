//! Elapsed time since today's last clock-in.

use chrono::{DateTime, Utc};

use crate::calendar::day_bounds;
use crate::event::ClockInEvent;
use crate::store::EventStore;
use crate::types::UserId;

/// Today's last clock-in and the whole seconds elapsed since it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSession {
    pub clock_in: ClockInEvent,
    pub elapsed_seconds: i64,
}

/// Finds today's last clock-in and measures from it to `now`.
///
/// A clock-out later the same day does not stop the count. A clock-in
/// stamped after `now` reports zero elapsed seconds.
pub fn open_session<S: EventStore + ?Sized>(
    store: &S,
    user: &UserId,
    now: DateTime<Utc>,
) -> Result<Option<OpenSession>, S::Error> {
    let (start, end) = day_bounds(now);
    let Some(clock_in) = store.last_clock_in(user, start, end)? else {
        return Ok(None);
    };

    let elapsed_seconds = (now - clock_in.timestamp).num_seconds().max(0);
    Ok(Some(OpenSession {
        clock_in,
        elapsed_seconds,
    }))
}

/// Whole seconds since today's last clock-in, or `None` if there is none.
pub fn current_open_duration<S: EventStore + ?Sized>(
    store: &S,
    user: &UserId,
    now: DateTime<Utc>,
) -> Result<Option<i64>, S::Error> {
    Ok(open_session(store, user, now)?.map(|session| session.elapsed_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn user() -> UserId {
        UserId::new("test").unwrap()
    }

    #[test]
    fn ten_hours_after_clock_in() {
        let mut store = MemoryStore::new();
        store.insert_clock_in(&user(), ts("1997-07-06T08:00:12Z")).unwrap();

        let elapsed = current_open_duration(&store, &user(), ts("1997-07-06T18:00:12Z")).unwrap();
        assert_eq!(elapsed, Some(36_000));
    }

    #[test]
    fn no_clock_in_today_is_absent() {
        let mut store = MemoryStore::new();
        store.insert_clock_in(&user(), ts("1997-07-06T08:00:12Z")).unwrap();

        let elapsed = current_open_duration(&store, &user(), ts("1997-07-07T18:00:12Z")).unwrap();
        assert_eq!(elapsed, None);
    }

    #[test]
    fn keeps_counting_after_clock_out() {
        let mut store = MemoryStore::new();
        store.insert_clock_in(&user(), ts("2022-01-04T08:00:00Z")).unwrap();
        store.insert_clock_out(&user(), ts("2022-01-04T09:00:00Z")).unwrap();

        let elapsed = current_open_duration(&store, &user(), ts("2022-01-04T10:00:00Z")).unwrap();
        assert_eq!(elapsed, Some(7200));
    }

    #[test]
    fn measures_from_latest_clock_in() {
        let mut store = MemoryStore::new();
        store.insert_clock_in(&user(), ts("2022-01-04T08:00:00Z")).unwrap();
        store.insert_clock_in(&user(), ts("2022-01-04T13:00:00Z")).unwrap();

        let session = open_session(&store, &user(), ts("2022-01-04T13:00:30.900Z"))
            .unwrap()
            .unwrap();
        assert_eq!(session.clock_in.timestamp, ts("2022-01-04T13:00:00Z"));
        assert_eq!(session.elapsed_seconds, 30);
    }

    #[test]
    fn future_clock_in_reports_zero() {
        let mut store = MemoryStore::new();
        store.insert_clock_in(&user(), ts("2022-01-04T15:00:00Z")).unwrap();

        let elapsed = current_open_duration(&store, &user(), ts("2022-01-04T14:00:00Z")).unwrap();
        assert_eq!(elapsed, Some(0));
    }
}
