//! Me command: echo the caller identity.

use std::io::Write;

use anyhow::Result;
use clockio_core::{Caller, Clock, ClockService, EventStore};

/// Prints the authenticated caller's user ID.
pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    store: &mut S,
    caller: &Caller,
    clock: &dyn Clock,
) -> Result<()> {
    let service = ClockService::new(store, clock);
    let user = service.me(caller)?;
    writeln!(writer, "{user}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clockio_core::SystemClock;
    use clockio_db::Database;

    #[test]
    fn prints_user_id() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        run(
            &mut output,
            &mut db,
            &Caller::from_user_id(Some("sarit")),
            &SystemClock,
        )
        .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "sarit\n");
    }

    #[test]
    fn anonymous_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        let err = run(&mut output, &mut db, &Caller::Anonymous, &SystemClock).unwrap_err();
        assert_eq!(
            err.to_string(),
            "authentication credentials were not provided"
        );
    }
}
