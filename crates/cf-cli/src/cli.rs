//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Personal carbon footprint tracker.
///
/// Logs everyday activities, estimates their emissions with fixed factors, and
/// serves the records over a small HTTP API.
#[derive(Debug, Parser)]
#[command(name = "cf", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server.
    Serve {
        /// Address to bind (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config).
        #[arg(long)]
        port: Option<u16>,
    },

    /// Record an activity.
    Add {
        /// Activity category (transport, energy, food, shopping, other).
        #[arg(long)]
        category: String,

        /// Category-specific type (e.g. car, electricity, vegan_day).
        #[arg(long = "type")]
        kind: String,

        /// Amount in the type's unit (km, kWh, kg, currency spent).
        #[arg(long, default_value_t = 0.0)]
        quantity: f64,

        /// Unit label; `kg` or `kgco2e` for direct values in the `other` category.
        #[arg(long, default_value = "")]
        unit: String,

        /// Day of the activity (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded activities.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete an activity by ID.
    Delete {
        /// Activity ID.
        id: i64,
    },

    /// Summarize emissions over a date range.
    Summary {
        /// First day (YYYY-MM-DD), defaults to 29 days before today.
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the emission factor table.
    Factors {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
