//! Pretty output formatting.

use calgrid_core::calendar::{
    build_month_cells, CalendarView, DayCell, Event, HealthStatus, DAYS_PER_WEEK, WEEKDAY_LABELS,
};
use calgrid_core::serde::format_time;
use chrono::{Datelike, NaiveDate};

use crate::error::{ClientError, Result};

/// Events listed in a month cell before the rest collapse into "+N more".
pub const MAX_EVENTS_PER_CELL: usize = 3;

const CELL_WIDTH: usize = 16;

/// Format an event for display.
pub fn format_event(event: &Event) -> String {
    let mut output = format!(
        "{}\n  ID: {}\n  Date: {}\n  Time: {} - {}",
        event.title,
        event.id,
        event.date,
        format_time(&event.start_time),
        format_time(&event.end_time)
    );
    if let Some(desc) = &event.description {
        output.push_str(&format!("\n  Description: {}", desc));
    }
    output
}

/// Format events for display.
pub fn format_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    output
}

/// Format a health check for display.
pub fn format_health(health: &HealthStatus) -> String {
    format!(
        "Health:\n  Status: {}\n  Timestamp: {}",
        health.status,
        health.timestamp.to_rfc3339()
    )
}

/// Render the month grid as a text table.
///
/// Days outside the anchor month are shown in parentheses and today in
/// brackets. Only the month layout can be rendered.
pub fn format_month(view: &CalendarView, today: NaiveDate) -> Result<String> {
    let mode = view.mode();
    if !mode.is_implemented() {
        return Err(ClientError::NotImplemented(mode.name()));
    }

    let grid = view.grid();
    let cells = build_month_cells(&grid, view.events.as_slice(), today);
    let border = border();

    let mut output = format!("{}\n", grid.anchor().format("%B %Y"));
    output.push_str(&border);
    output.push_str(&row(WEEKDAY_LABELS.iter().map(|label| label.to_string())));
    output.push_str(&border);

    for week in cells.chunks(DAYS_PER_WEEK) {
        for line in 0..MAX_EVENTS_PER_CELL + 2 {
            output.push_str(&row(week.iter().map(|cell| cell_line(cell, line))));
        }
        output.push_str(&border);
    }

    Ok(output)
}

/// Text for one line of a cell: the day number, an event, or the overflow.
fn cell_line(cell: &DayCell, line: usize) -> String {
    match line {
        0 => {
            let day = cell.date.day();
            if cell.is_today {
                format!("[{day}]")
            } else if cell.in_month {
                day.to_string()
            } else {
                format!("({day})")
            }
        }
        n if n <= MAX_EVENTS_PER_CELL => cell
            .events
            .get(n - 1)
            .map(|e| format!("{} {}", format_time(&e.start_time), e.title))
            .unwrap_or_default(),
        _ => match cell.overflow(MAX_EVENTS_PER_CELL) {
            0 => String::new(),
            hidden => format!("+{hidden} more"),
        },
    }
}

fn row(texts: impl Iterator<Item = String>) -> String {
    let mut line = String::from("|");
    for text in texts {
        line.push_str(&format!("{:<CELL_WIDTH$}|", truncate(&text)));
    }
    line.push('\n');
    line
}

fn border() -> String {
    let mut line = String::from("+");
    for _ in 0..DAYS_PER_WEEK {
        line.push_str(&"-".repeat(CELL_WIDTH));
        line.push('+');
    }
    line.push('\n');
    line
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= CELL_WIDTH {
        return text.to_string();
    }
    let mut short: String = text.chars().take(CELL_WIDTH - 1).collect();
    short.push('~');
    short
}
