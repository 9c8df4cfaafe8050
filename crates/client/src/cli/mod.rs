//! CLI command definitions.

pub mod events;
pub mod month;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::DEFAULT_BASE_URL;

/// CLI client for the calgrid API.
#[derive(Debug, Parser)]
#[command(name = "calgrid-client")]
#[command(about = "CLI client for the calgrid API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "CALGRID_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds to wait for each store call.
    #[arg(long, env = "CALGRID_TIMEOUT_SECS", default_value = "5")]
    pub timeout_secs: u64,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the month grid.
    Month(month::MonthCommand),
    /// Event management.
    Events(events::EventsCommand),
    /// Server health check.
    Health,
}
