//! Report command: per-day hours for a month or ISO week.

use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clockio_core::{Caller, Clock, ClockService, EventStore, PeriodReport};

use crate::commands::util::format_hours;

/// Report period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month { year: i32, month: u32 },
    Week { year: i32, week: u32 },
}

impl Period {
    /// Picks the period from CLI flags, defaulting to the month of `today`.
    ///
    /// With `--week`, `--year` is the ISO year; otherwise it is the calendar year.
    pub fn from_flags(
        month: Option<u32>,
        year: Option<i32>,
        week: Option<u32>,
        today: NaiveDate,
    ) -> Self {
        match week {
            Some(week) => Self::Week {
                year: year.unwrap_or_else(|| today.iso_week().year()),
                week,
            },
            None => Self::Month {
                year: year.unwrap_or_else(|| today.year()),
                month: month.unwrap_or_else(|| today.month()),
            },
        }
    }

    fn title(self) -> String {
        match self {
            Self::Month { year, month } => format!("Month {year}-{month:02}"),
            Self::Week { year, week } => format!("Week {year}-W{week:02}"),
        }
    }
}

/// Prints the per-day breakdown and total for `period`.
pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    store: &mut S,
    caller: &Caller,
    clock: &dyn Clock,
    period: Period,
    json: bool,
) -> Result<()> {
    let service = ClockService::new(store, clock);
    let report = match period {
        Period::Month { year, month } => service.month_report(caller, month, year)?,
        Period::Week { year, week } => service.week_report(caller, year, week)?,
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string(&report)?)?;
        return Ok(());
    }

    write_report(writer, period, &report)
}

fn write_report<W: Write>(writer: &mut W, period: Period, report: &PeriodReport) -> Result<()> {
    match (report.days.first(), report.days.last()) {
        (Some(first), Some(last)) => writeln!(
            writer,
            "{} ({} to {})",
            period.title(),
            first.date,
            last.date
        )?,
        _ => writeln!(writer, "{}", period.title())?,
    }
    for day in &report.days {
        writeln!(
            writer,
            "{} {}  {}",
            day.date,
            day.date.format("%a"),
            format_hours(day.hours)
        )?;
    }
    writeln!(writer, "Total: {}h", report.total)?;
    Ok(())
}
