//! Calendar windows: day bounds, month dates and ISO week dates.
//!
//! All windows are computed in UTC and are half-open: `[start, end)`.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc, Weekday};
use thiserror::Error;

/// Errors for calendar lookups with out-of-range inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Month number outside 1..=12.
    #[error("month must be between 1 and 12, got {month}")]
    InvalidMonth { month: u32 },

    /// The ISO year has no such week (e.g. week 53 of a 52-week year).
    #[error("ISO week {week} does not exist in {year}")]
    InvalidWeek { year: i32, week: u32 },

    /// Year outside the range chrono can represent.
    #[error("year {year} is out of range")]
    YearOutOfRange { year: i32 },
}

/// Returns the half-open window covering the calendar date of `instant`.
pub fn day_bounds(instant: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    date_bounds(instant.date_naive())
}

/// Returns the half-open window `[midnight, next midnight)` for `date`.
pub fn date_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start + chrono::Duration::days(1);
    (start, end)
}

/// Every date of `month` in `year`, ascending.
pub fn dates_of_month(month: u32, year: i32) -> Result<Vec<NaiveDate>, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearOutOfRange { year })?;
    Ok(month_from(first))
}

/// Every date of the month containing `reference`, ascending.
pub fn current_month_dates(reference: NaiveDate) -> Vec<NaiveDate> {
    let first = reference - Days::new(u64::from(reference.day0()));
    month_from(first)
}

fn month_from(first: NaiveDate) -> Vec<NaiveDate> {
    let month = first.month();
    first.iter_days().take_while(|d| d.month() == month).collect()
}

/// Monday through Sunday of ISO week `iso_week` in ISO year `year`.
pub fn week_dates(year: i32, iso_week: u32) -> Result<[NaiveDate; 7], CalendarError> {
    let monday = NaiveDate::from_isoywd_opt(year, iso_week, Weekday::Mon).ok_or(
        CalendarError::InvalidWeek {
            year,
            week: iso_week,
        },
    )?;
    Ok(week_from(monday))
}

/// Monday through Sunday of the ISO week containing `reference`.
pub fn current_week_dates(reference: NaiveDate) -> [NaiveDate; 7] {
    let days_since_monday = reference.weekday().num_days_from_monday();
    let monday = reference - Days::new(u64::from(days_since_monday));
    week_from(monday)
}

fn week_from(monday: NaiveDate) -> [NaiveDate; 7] {
    [0, 1, 2, 3, 4, 5, 6].map(|offset| monday + Days::new(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_bounds_are_midnight_to_midnight() {
        let instant: DateTime<Utc> = "1997-07-06T08:00:12Z".parse().unwrap();
        let (start, end) = day_bounds(instant);
        assert_eq!(start, "1997-07-06T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(end, "1997-07-07T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn day_bounds_at_exact_midnight_start_that_day() {
        let instant: DateTime<Utc> = "2022-01-04T00:00:00Z".parse().unwrap();
        let (start, _) = day_bounds(instant);
        assert_eq!(start, instant);
    }

    #[test]
    fn day_bounds_cross_year_end() {
        let (start, end) = date_bounds(date(2021, 12, 31));
        assert_eq!(start.date_naive(), date(2021, 12, 31));
        assert_eq!(end.date_naive(), date(2022, 1, 1));
    }

    #[test]
    fn january_has_31_dates() {
        let dates = dates_of_month(1, 2022).unwrap();
        assert_eq!(dates.len(), 31);
        assert_eq!(dates[0], date(2022, 1, 1));
        assert_eq!(dates[30], date(2022, 1, 31));
    }

    #[test]
    fn february_respects_leap_years() {
        let dates = dates_of_month(2, 2022).unwrap();
        assert_eq!(dates.len(), 28);
        assert_eq!(dates.last(), Some(&date(2022, 2, 28)));

        assert_eq!(dates_of_month(2, 2024).unwrap().len(), 29);
        assert_eq!(dates_of_month(2, 1900).unwrap().len(), 28);
        assert_eq!(dates_of_month(2, 2000).unwrap().len(), 29);
    }

    #[test]
    fn june_has_30_dates() {
        let dates = dates_of_month(6, 2022).unwrap();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], date(2022, 6, 1));
        assert_eq!(dates[29], date(2022, 6, 30));
    }

    #[test]
    fn month_dates_are_ascending_and_contiguous() {
        let dates = dates_of_month(12, 2022).unwrap();
        for pair in dates.windows(2) {
            assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert_eq!(
            dates_of_month(0, 2022),
            Err(CalendarError::InvalidMonth { month: 0 })
        );
        assert_eq!(
            dates_of_month(13, 2022),
            Err(CalendarError::InvalidMonth { month: 13 })
        );
    }

    #[test]
    fn current_month_dates_uses_reference_month() {
        let dates = current_month_dates(date(2022, 2, 6));
        assert_eq!(dates.len(), 28);
        assert_eq!(dates[0], date(2022, 2, 1));
    }

    #[test]
    fn week_dates_run_monday_to_sunday() {
        let week = week_dates(2022, 1).unwrap();
        assert_eq!(week[0], date(2022, 1, 3));
        assert_eq!(week[0].weekday(), Weekday::Mon);
        assert_eq!(week[6], date(2022, 1, 9));
        assert_eq!(week[6].weekday(), Weekday::Sun);
    }

    #[test]
    fn week_dates_follow_iso_year_boundaries() {
        // 2026-01-01 is a Thursday, so ISO week 1 starts in December 2025.
        let week = week_dates(2026, 1).unwrap();
        assert_eq!(week[0], date(2025, 12, 29));
        assert_eq!(week[6], date(2026, 1, 4));
    }

    #[test]
    fn week_53_only_exists_in_long_years() {
        assert!(week_dates(2020, 53).is_ok());
        assert_eq!(
            week_dates(2022, 53),
            Err(CalendarError::InvalidWeek {
                year: 2022,
                week: 53
            })
        );
        assert!(week_dates(2022, 0).is_err());
    }

    #[test]
    fn current_week_dates_matches_iso_week() {
        let reference = date(2022, 1, 7);
        let iso = reference.iso_week();
        assert_eq!(
            current_week_dates(reference),
            week_dates(iso.year(), iso.week()).unwrap()
        );
    }

    #[test]
    fn current_week_dates_on_sunday_stays_in_same_week() {
        let week = current_week_dates(date(2022, 1, 9));
        assert_eq!(week[0], date(2022, 1, 3));
    }
}
