use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use clockio_core::Caller;
use tracing_subscriber::EnvFilter;

use clockio_cli::commands::{current, hours, me, record, report, status, util};
use clockio_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(clockio_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db =
        clockio_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

/// Resolves the caller: `--user` wins over the configured user.
fn resolve_caller(cli_user: Option<&str>, config: &Config) -> Caller {
    let caller = Caller::from_user_id(cli_user.or(config.user.as_deref()));
    tracing::debug!(?caller, "resolved caller");
    caller
}

fn parse_optional(s: Option<&str>) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    s.map(util::parse_datetime).transpose()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut db, config) = open_database(cli.config.as_deref())?;
    let caller = resolve_caller(cli.user.as_deref(), &config);
    let mut stdout = io::stdout().lock();

    match command {
        Commands::In { at } => {
            let clock = util::clock_for(parse_optional(at.as_deref())?);
            record::clock_in(&mut stdout, &mut db, &caller, &*clock)?;
        }
        Commands::Out { at } => {
            let clock = util::clock_for(parse_optional(at.as_deref())?);
            record::clock_out(&mut stdout, &mut db, &caller, &*clock)?;
        }
        Commands::Current { as_of, json } => {
            let clock = util::clock_for(parse_optional(as_of.as_deref())?);
            current::run(&mut stdout, &mut db, &caller, &*clock, *json)?;
        }
        Commands::Hours { as_of, json } => {
            let clock = util::clock_for(parse_optional(as_of.as_deref())?);
            hours::run(&mut stdout, &mut db, &caller, &*clock, *json)?;
        }
        Commands::Report {
            month,
            year,
            week,
            json,
        } => {
            let clock = util::clock_for(None);
            let today = clock.now().date_naive();
            let period = report::Period::from_flags(*month, *year, *week, today);
            report::run(&mut stdout, &mut db, &caller, &*clock, period, *json)?;
        }
        Commands::Me => {
            me::run(&mut stdout, &mut db, &caller, &*util::clock_for(None))?;
        }
        Commands::Status => {
            status::run(&mut stdout, &db, &config.database_path)?;
        }
    }

    stdout.flush()?;
    Ok(())
}
