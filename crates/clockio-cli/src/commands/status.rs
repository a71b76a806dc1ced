//! Status command for showing stored events and recent activity per user.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use clockio_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, database_path: &Path) -> Result<()> {
    let counts = db.event_counts()?;
    let users = db.last_event_times_by_user()?;

    writeln!(writer, "clockio status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Clock-ins:  {}", counts.clock_ins)?;
    writeln!(writer, "Clock-outs: {}", counts.clock_outs)?;

    if users.is_empty() {
        writeln!(writer, "No events recorded.")?;
        return Ok(());
    }

    writeln!(writer, "Users:")?;
    for user in users {
        writeln!(writer, "- {}: {}", user.user_id, user.last_event)?;
    }

    Ok(())
}
