//! Event CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Event management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Available event actions.
///
/// Field values for create and update are passed through as text and
/// checked by the event form validator.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List events in a date range.
    List {
        /// First day (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// Last day, inclusive (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,
    },
    /// Get an event by ID.
    Get {
        /// Event ID.
        id: String,
    },
    /// Create a new event.
    Create {
        /// Event title.
        #[arg(long)]
        title: String,
        /// Event date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Start time (HH:MM).
        #[arg(long)]
        start_time: String,
        /// End time (HH:MM).
        #[arg(long)]
        end_time: String,
        /// Optional description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Update an event. Omitted fields keep their current value.
    Update {
        /// Event ID.
        id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
        /// New start time (HH:MM).
        #[arg(long)]
        start_time: Option<String>,
        /// New end time (HH:MM).
        #[arg(long)]
        end_time: Option<String>,
        /// New description. Pass an empty string to clear it.
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event.
    Delete {
        /// Event ID.
        id: String,
    },
}
