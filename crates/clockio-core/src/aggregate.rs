//! Period totals over a set of calendar days.

use chrono::NaiveDate;
use serde::Serialize;

use crate::resolver::hours_for_day;
use crate::store::EventStore;
use crate::types::UserId;

/// Worked hours for one date; `hours` is `None` when the day has no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayHours {
    pub date: NaiveDate,
    pub hours: Option<i64>,
}

/// Resolves each date in `dates`, preserving order and absent days.
pub fn daily_hours<S: EventStore + ?Sized>(
    store: &S,
    user: &UserId,
    dates: &[NaiveDate],
) -> Result<Vec<DayHours>, S::Error> {
    dates
        .iter()
        .map(|&date| {
            Ok(DayHours {
                date,
                hours: hours_for_day(store, user, date)?,
            })
        })
        .collect()
}

/// Total whole hours across `dates`. Days without data contribute zero.
pub fn sum_hours<S: EventStore + ?Sized>(
    store: &S,
    user: &UserId,
    dates: &[NaiveDate],
) -> Result<i64, S::Error> {
    let days = daily_hours(store, user, dates)?;
    let total: i64 = days.iter().filter_map(|d| d.hours).sum();
    tracing::debug!(user = %user, days = dates.len(), total, "summed worked hours");
    Ok(total)
}
