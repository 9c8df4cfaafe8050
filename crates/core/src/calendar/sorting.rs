use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use super::grid::MonthGrid;
use super::types::{DayCell, Event};

/// Orders events by date, then start time.
pub fn compare_events(a: &Event, b: &Event) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

/// Sorts events by date, then start time. The sort is stable, so events
/// sharing a slot keep their relative order.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(compare_events);
}

/// Returns true if events are in non-decreasing (date, start time) order.
pub fn is_sorted(events: &[Event]) -> bool {
    events
        .windows(2)
        .all(|pair| compare_events(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Groups events by their date.
pub fn group_events_by_date(events: &[Event]) -> HashMap<NaiveDate, Vec<&Event>> {
    let mut grouped: HashMap<NaiveDate, Vec<&Event>> = HashMap::new();

    for event in events {
        grouped.entry(event.date).or_default().push(event);
    }

    grouped
}

/// Builds the 42 day cells of a month grid from the loaded events.
///
/// Each cell lists its events ordered by start time. Events outside the
/// grid are ignored.
pub fn build_month_cells(grid: &MonthGrid, events: &[Event], today: NaiveDate) -> Vec<DayCell> {
    let grouped = group_events_by_date(events);

    grid.cells()
        .iter()
        .map(|date| {
            let mut day_events: Vec<Event> = grouped
                .get(date)
                .map(|refs| refs.iter().map(|e| (*e).clone()).collect())
                .unwrap_or_default();

            sort_events(&mut day_events);

            DayCell {
                date: *date,
                in_month: grid.is_in_month(*date),
                is_today: *date == today,
                events: day_events,
            }
        })
        .collect()
}
