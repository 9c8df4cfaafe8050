//! The create/edit dialog as an explicit state machine.

use chrono::NaiveDate;

use super::error::EditorError;
use super::types::{DraftField, Event, EventDraft, EventId, EventInput};
use super::validation::validate_draft;

/// Editor dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    /// Accepting edits. `error` holds the last validation or store message.
    Open {
        draft: EventDraft,
        error: Option<String>,
    },
    /// Waiting for the store to accept the submitted draft.
    Submitting { draft: EventDraft },
}

/// A validated draft ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// `None` for a create, the persisted id for an update.
    pub id: Option<EventId>,
    pub input: EventInput,
}

impl Submission {
    pub fn is_create(&self) -> bool {
        self.id.is_none()
    }
}

impl EditorState {
    /// State name used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Closed => "closed",
            EditorState::Open { .. } => "open",
            EditorState::Submitting { .. } => "submitting",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, EditorState::Closed)
    }

    pub fn draft(&self) -> Option<&EventDraft> {
        match self {
            EditorState::Closed => None,
            EditorState::Open { draft, .. } | EditorState::Submitting { draft } => Some(draft),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EditorState::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Opens an empty draft for the clicked day.
    pub fn open_for_date(&mut self, date: NaiveDate) -> Result<(), EditorError> {
        self.open(EventDraft::for_date(date), "open a new event")
    }

    /// Opens a draft pre-filled from an existing event.
    pub fn open_for_event(&mut self, event: &Event) -> Result<(), EditorError> {
        self.open(EventDraft::from_event(event), "open an event")
    }

    /// Records an edit. No validation happens until submit.
    pub fn set_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        match self {
            EditorState::Open { draft, error } => {
                draft.set(field, value);
                *error = None;
                Ok(())
            }
            _ => Err(self.invalid("edit")),
        }
    }

    /// Validates the draft and moves to `Submitting`.
    ///
    /// On validation failure the editor stays open with the message attached
    /// and the error is returned.
    pub fn submit(&mut self) -> Result<Submission, EditorError> {
        let (draft, error) = match self {
            EditorState::Open { draft, error } => (draft, error),
            _ => return Err(self.invalid("submit")),
        };

        match validate_draft(draft) {
            Ok(input) => {
                let submission = Submission {
                    id: draft.id.clone(),
                    input,
                };
                let draft = std::mem::take(draft);
                *self = EditorState::Submitting { draft };
                Ok(submission)
            }
            Err(e) => {
                *error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// The store accepted the submission.
    pub fn store_succeeded(&mut self) -> Result<(), EditorError> {
        match self {
            EditorState::Submitting { .. } => {
                *self = EditorState::Closed;
                Ok(())
            }
            _ => Err(self.invalid("complete a submission")),
        }
    }

    /// The store rejected the submission. Reopens with the draft intact.
    pub fn store_failed(&mut self, message: impl Into<String>) -> Result<(), EditorError> {
        match std::mem::take(self) {
            EditorState::Submitting { draft } => {
                *self = EditorState::Open {
                    draft,
                    error: Some(message.into()),
                };
                Ok(())
            }
            other => {
                *self = other;
                Err(self.invalid("fail a submission"))
            }
        }
    }

    /// Closes the editor without validating or writing. Closing an already
    /// closed editor does nothing.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        match self {
            EditorState::Submitting { .. } => Err(self.invalid("cancel")),
            _ => {
                *self = EditorState::Closed;
                Ok(())
            }
        }
    }

    fn open(&mut self, draft: EventDraft, action: &'static str) -> Result<(), EditorError> {
        if !self.is_closed() {
            return Err(self.invalid(action));
        }
        *self = EditorState::Open { draft, error: None };
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> EditorError {
        EditorError::InvalidTransition {
            action,
            state: self.name(),
        }
    }
}
