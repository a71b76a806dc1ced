//! Record commands: clock in and clock out.

use std::io::Write;

use anyhow::Result;
use clockio_core::{Caller, Clock, ClockService, EventStore};

use crate::commands::util::format_timestamp;

/// Records a clock-in for the caller.
pub fn clock_in<W: Write, S: EventStore>(
    writer: &mut W,
    store: &mut S,
    caller: &Caller,
    clock: &dyn Clock,
) -> Result<()> {
    let mut service = ClockService::new(store, clock);
    let event = service.clock_in(caller)?;
    writeln!(
        writer,
        "Clocked in as {} at {}",
        event.user_id,
        format_timestamp(event.timestamp)
    )?;
    Ok(())
}

/// Records a clock-out for the caller.
pub fn clock_out<W: Write, S: EventStore>(
    writer: &mut W,
    store: &mut S,
    caller: &Caller,
    clock: &dyn Clock,
) -> Result<()> {
    let mut service = ClockService::new(store, clock);
    let event = service.clock_out(caller)?;
    writeln!(
        writer,
        "Clocked out as {} at {}",
        event.user_id,
        format_timestamp(event.timestamp)
    )?;
    Ok(())
}
