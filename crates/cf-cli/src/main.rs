use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use cf_core::{EmissionCalculator, NewActivity};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cf_cli::commands::{add, delete, factors, list, serve, summary};
use cf_cli::tracker::today;
use cf_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(cf_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = cf_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();
    let calculator = EmissionCalculator::default();

    match &cli.command {
        Some(Commands::Serve { host, port }) => {
            let (db, mut config) = open_database(cli.config.as_deref())?;
            if let Some(host) = host {
                config.host.clone_from(host);
            }
            if let Some(port) = port {
                config.port = *port;
            }
            serve::run(&config, db)?;
        }
        Some(Commands::Add {
            category,
            kind,
            quantity,
            unit,
            date,
        }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            let input = NewActivity::new(category.as_str(), kind.as_str(), *quantity)
                .with_unit(unit.as_str());
            add::run(
                &mut stdout,
                &mut db,
                &calculator,
                input,
                date.as_deref(),
                today(),
            )?;
        }
        Some(Commands::List { json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            list::run(&mut stdout, &db, *json)?;
        }
        Some(Commands::Delete { id }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            delete::run(&mut stdout, &mut db, *id)?;
        }
        Some(Commands::Summary { from, to, json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            summary::run(
                &mut stdout,
                &db,
                from.as_deref(),
                to.as_deref(),
                *json,
                today(),
            )?;
        }
        Some(Commands::Factors { json }) => {
            // Factors are fixed in code, no database needed
            factors::run(&mut stdout, &calculator, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
