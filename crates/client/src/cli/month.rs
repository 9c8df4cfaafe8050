//! Month view CLI command.

use calgrid_core::calendar::{Navigation, ViewMode};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// Fetch and render a month grid.
#[derive(Debug, Parser)]
pub struct MonthCommand {
    /// Any date in the month to show (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Step back this many months.
    #[arg(long, conflicts_with = "next")]
    pub prev: Option<u32>,
    /// Step forward this many months.
    #[arg(long)]
    pub next: Option<u32>,
    /// Calendar layout.
    #[arg(long, value_enum, default_value = "month")]
    pub mode: ViewModeArg,
}

impl MonthCommand {
    /// The anchor date after applying `--date`, `--prev` and `--next`.
    pub fn anchor(&self, today: NaiveDate) -> NaiveDate {
        let start = self.date.unwrap_or(today);
        let (step, count) = match (self.prev, self.next) {
            (Some(n), _) => (Navigation::Previous, n),
            (None, Some(n)) => (Navigation::Next, n),
            (None, None) => return start,
        };
        (0..count).fold(start, |anchor, _| step.apply(anchor, today))
    }
}

/// CLI view mode (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViewModeArg {
    Month,
    Week,
    Day,
}

impl From<ViewModeArg> for ViewMode {
    fn from(mode: ViewModeArg) -> Self {
        match mode {
            ViewModeArg::Month => ViewMode::Month,
            ViewModeArg::Week => ViewMode::Week,
            ViewModeArg::Day => ViewMode::Day,
        }
    }
}
