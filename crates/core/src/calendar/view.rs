//! View state owned by the calendar controller.
//!
//! Range fetches are tagged with a [`RequestToken`]. Only the response to
//! the most recently issued token is applied, so a slow response for a
//! month the user already navigated away from cannot overwrite newer data.

use std::fmt;

use chrono::NaiveDate;

use super::editor::EditorState;
use super::grid::{clamp_anchor, visible_range, MonthGrid, Navigation};
use super::reconciler::EventCollection;
use super::types::Event;
use crate::storage::DateRange;

/// Identifies one range fetch. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the controller should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub range: DateRange,
}

/// Whether a fetch response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer fetch was issued; the response was discarded.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Calendar layout. Only the month view is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
            ViewMode::Day => "day",
        }
    }

    pub fn is_implemented(&self) -> bool {
        matches!(self, ViewMode::Month)
    }
}

/// Everything the month view renders from.
#[derive(Debug, Clone)]
pub struct CalendarView {
    anchor: NaiveDate,
    mode: ViewMode,
    pub events: EventCollection,
    pub editor: EditorState,
    latest_token: RequestToken,
    status: ViewStatus,
}

impl CalendarView {
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            anchor: clamp_anchor(anchor),
            mode: ViewMode::default(),
            events: EventCollection::new(),
            editor: EditorState::default(),
            latest_token: RequestToken::default(),
            status: ViewStatus::Idle,
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.anchor)
    }

    /// The date range currently on screen.
    pub fn range(&self) -> DateRange {
        visible_range(self.anchor)
    }

    /// Moves the anchor. Returns a ticket if the visible range changed and
    /// events must be refetched.
    pub fn navigate(&mut self, navigation: Navigation, today: NaiveDate) -> Option<FetchTicket> {
        let previous = self.range();
        self.anchor = clamp_anchor(navigation.apply(self.anchor, today));

        (self.range() != previous).then(|| self.begin_fetch())
    }

    /// Issues a new token for the current range, superseding any fetch
    /// still in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_token = self.latest_token.next();
        self.status = ViewStatus::Loading;
        FetchTicket {
            token: self.latest_token,
            range: self.range(),
        }
    }

    /// Applies a fetch response if it answers the latest request.
    pub fn finish_fetch(&mut self, token: RequestToken, events: Vec<Event>) -> LoadOutcome {
        if token != self.latest_token {
            return LoadOutcome::Stale;
        }
        self.events.load(events);
        self.status = ViewStatus::Ready;
        LoadOutcome::Applied
    }

    /// Records a failed fetch if it answers the latest request. The loaded
    /// events are left untouched.
    pub fn fail_fetch(&mut self, token: RequestToken, message: impl Into<String>) -> LoadOutcome {
        if token != self.latest_token {
            return LoadOutcome::Stale;
        }
        self.status = ViewStatus::Failed(message.into());
        LoadOutcome::Applied
    }
}
