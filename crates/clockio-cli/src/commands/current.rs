//! Current clock command: time since today's last clock-in.

use std::io::Write;

use anyhow::Result;
use clockio_core::{Caller, Clock, ClockService, EventStore};

use crate::commands::util::{format_elapsed, format_timestamp};

/// Prints the elapsed time since the caller's last clock-in today.
pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    store: &mut S,
    caller: &Caller,
    clock: &dyn Clock,
    json: bool,
) -> Result<()> {
    let service = ClockService::new(store, clock);
    let current = service.current_clock(caller)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string(&current)?)?;
        return Ok(());
    }

    match current {
        Some(current) => {
            writeln!(
                writer,
                "Clocked in at {}",
                format_timestamp(current.clocked_in_at)
            )?;
            writeln!(
                writer,
                "Elapsed: {} ({}s)",
                format_elapsed(current.elapsed_seconds),
                current.elapsed_seconds
            )?;
        }
        None => writeln!(writer, "Not clocked in today.")?,
    }
    Ok(())
}
