//! Worked hours for a single calendar day.
//!
//! A day's session is the last clock-in and the last clock-out inside the
//! day window. There is no session pairing; events are loosely matched.

use chrono::NaiveDate;

use crate::calendar::date_bounds;
use crate::store::EventStore;
use crate::types::UserId;

const SECONDS_PER_HOUR: i64 = 3600;

/// Whole hours worked by `user` on `date`.
///
/// Returns `None` when the day has no clock-out, or has a clock-out without
/// any clock-in. A clock-out earlier than the clock-in counts as zero hours.
pub fn hours_for_day<S: EventStore + ?Sized>(
    store: &S,
    user: &UserId,
    date: NaiveDate,
) -> Result<Option<i64>, S::Error> {
    let (start, end) = date_bounds(date);

    let Some(clock_out) = store.last_clock_out(user, start, end)? else {
        return Ok(None);
    };
    let Some(clock_in) = store.last_clock_in(user, start, end)? else {
        tracing::debug!(user = %user, %date, "clock-out without clock-in; no hours");
        return Ok(None);
    };

    let seconds = (clock_out.timestamp - clock_in.timestamp).num_seconds();
    if seconds < 0 {
        tracing::warn!(
            user = %user,
            %date,
            clock_in = %clock_in.timestamp,
            clock_out = %clock_out.timestamp,
            "clock-out precedes clock-in; counting zero hours"
        );
        return Ok(Some(0));
    }

    Ok(Some(seconds / SECONDS_PER_HOUR))
}
