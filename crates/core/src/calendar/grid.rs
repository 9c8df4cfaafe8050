//! Month grid generation.
//!
//! The month view always renders six weeks (42 cells) starting on the
//! Sunday on or before the first of the month. The same start date feeds
//! both the rendered grid and the range requested from the store, so the
//! two can never disagree.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use crate::storage::DateRange;

/// Number of cells in a month grid (6 weeks of 7 days).
pub const GRID_CELLS: usize = 42;

/// Days per grid row.
pub const DAYS_PER_WEEK: usize = 7;

/// First column of the grid.
pub const WEEK_START: Weekday = Weekday::Sun;

/// Column headers in grid order.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Pulls `anchor` far enough inside the representable calendar that its
/// whole grid, including the spill into neighbouring months, exists.
pub fn clamp_anchor(anchor: NaiveDate) -> NaiveDate {
    let lowest = NaiveDate::MIN
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MIN);
    let highest = NaiveDate::MAX
        .checked_sub_months(Months::new(2))
        .unwrap_or(NaiveDate::MAX);
    anchor.clamp(lowest, highest)
}

/// First day of the anchor's month.
pub fn first_of_month(anchor: NaiveDate) -> NaiveDate {
    anchor - Duration::days(i64::from(anchor.day0()))
}

/// The first grid cell: the week start on or before the first of the month.
pub fn grid_start(anchor: NaiveDate) -> NaiveDate {
    let first = first_of_month(clamp_anchor(anchor));
    let offset = first.weekday().days_since(WEEK_START);
    first - Duration::days(i64::from(offset))
}

/// Returns the 42 consecutive dates of the month grid containing `anchor`.
pub fn month_grid(anchor: NaiveDate) -> [NaiveDate; GRID_CELLS] {
    let start = grid_start(anchor);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// The inclusive date range covered by the month grid containing `anchor`.
pub fn visible_range(anchor: NaiveDate) -> DateRange {
    let start = grid_start(anchor);
    DateRange {
        start,
        end: start + Duration::days(GRID_CELLS as i64 - 1),
    }
}

/// The rendered month matrix for an anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    anchor: NaiveDate,
    cells: [NaiveDate; GRID_CELLS],
}

impl MonthGrid {
    /// Anchors outside the renderable calendar are clamped first.
    pub fn new(anchor: NaiveDate) -> Self {
        let anchor = clamp_anchor(anchor);
        Self {
            anchor,
            cells: month_grid(anchor),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn cells(&self) -> &[NaiveDate; GRID_CELLS] {
        &self.cells
    }

    /// The grid as six rows of seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// The range to request from the store for this grid.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.cells[0],
            end: self.cells[GRID_CELLS - 1],
        }
    }

    /// Returns true if `date` belongs to the anchor's month rather than a
    /// neighbouring month shown for padding.
    pub fn is_in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.anchor.year() && date.month() == self.anchor.month()
    }
}

/// Month navigation requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    Today,
    Goto(NaiveDate),
}

impl Navigation {
    /// Computes the new anchor date.
    ///
    /// Month steps clamp the day to the target month's length, so
    /// January 31 steps to the last day of February.
    pub fn apply(self, anchor: NaiveDate, today: NaiveDate) -> NaiveDate {
        match self {
            Navigation::Previous => anchor.checked_sub_months(Months::new(1)).unwrap_or(anchor),
            Navigation::Next => anchor.checked_add_months(Months::new(1)).unwrap_or(anchor),
            Navigation::Today => today,
            Navigation::Goto(date) => date,
        }
    }
}
