//! CLI subcommand implementations.

pub mod current;
pub mod hours;
pub mod me;
pub mod record;
pub mod report;
pub mod status;
pub mod util;
