//! Clocked hours command: today, current week and current month.

use std::io::Write;

use anyhow::Result;
use clockio_core::{Caller, Clock, ClockService, EventStore};

use crate::commands::util::format_hours;

/// Prints the caller's worked hours relative to `clock`.
pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    store: &mut S,
    caller: &Caller,
    clock: &dyn Clock,
    json: bool,
) -> Result<()> {
    let service = ClockService::new(store, clock);
    let hours = service.clocked_hours(caller)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string(&hours)?)?;
        return Ok(());
    }

    writeln!(writer, "Today:         {}", format_hours(hours.today))?;
    writeln!(
        writer,
        "Current week:  {}",
        format_hours(Some(hours.current_week))
    )?;
    writeln!(
        writer,
        "Current month: {}",
        format_hours(Some(hours.current_month))
    )?;
    Ok(())
}
