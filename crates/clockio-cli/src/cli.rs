//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Clock-in/clock-out time tracker.
///
/// Records when you start and stop working and sums up worked hours for
/// today, the current ISO week and the current month.
#[derive(Debug, Parser)]
#[command(name = "clockio", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Act as this user (overrides the configured user).
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clock in.
    In {
        /// Record the event at this time instead of now (ISO 8601 or "2 hours ago").
        #[arg(long)]
        at: Option<String>,
    },

    /// Clock out.
    Out {
        /// Record the event at this time instead of now (ISO 8601 or "2 hours ago").
        #[arg(long)]
        at: Option<String>,
    },

    /// Show time elapsed since today's last clock-in.
    Current {
        /// Evaluate as of this time instead of now.
        #[arg(long)]
        as_of: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show worked hours for today, this week and this month.
    Hours {
        /// Evaluate as of this time instead of now.
        #[arg(long)]
        as_of: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show per-day hours for a month (default: current) or an ISO week.
    Report {
        /// Month number (1-12).
        #[arg(long, conflicts_with = "week")]
        month: Option<u32>,

        /// Year (the ISO year when used with --week).
        #[arg(long)]
        year: Option<i32>,

        /// ISO week number (1-53).
        #[arg(long)]
        week: Option<u32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the current user.
    Me,

    /// Show database location and event counts.
    Status,
}
