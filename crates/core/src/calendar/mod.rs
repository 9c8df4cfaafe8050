mod editor;
mod error;
mod grid;
mod mock_data;
mod reconciler;
mod requests;
mod sorting;
mod types;
mod validation;
mod view;

pub use editor::{EditorState, Submission};
pub use error::{EditorError, ReconcileError, ValidationError};
pub use grid::{
    clamp_anchor, first_of_month, grid_start, month_grid, visible_range, MonthGrid, Navigation,
    DAYS_PER_WEEK, GRID_CELLS, WEEKDAY_LABELS, WEEK_START,
};
pub use mock_data::generate_seed_events;
pub use reconciler::EventCollection;
pub use requests::{ApiResponse, HealthStatus, RangeQuery, RangeQueryError};
pub use sorting::{build_month_cells, compare_events, group_events_by_date, is_sorted, sort_events};
pub use types::{
    DayCell, DraftField, Event, EventDraft, EventId, EventInput, DEFAULT_END_TIME,
    DEFAULT_START_TIME,
};
pub use validation::validate_draft;
pub use view::{CalendarView, FetchTicket, LoadOutcome, RequestToken, ViewMode, ViewStatus};
