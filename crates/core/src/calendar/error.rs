use thiserror::Error;

use super::types::{DraftField, EventId};

/// Errors raised by the event form validator. These never reach the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(DraftField),
    #[error("Invalid {field}: {value:?}")]
    InvalidFormat { field: DraftField, value: String },
    #[error("End time must be after start time")]
    InvalidTimeRange,
}

/// Consistency errors raised while patching the local event collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Event already present in the collection: {0}")]
    DuplicateEvent(EventId),
    #[error("Event not found in the collection: {0}")]
    NotFound(EventId),
}

/// Errors raised by the editor state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Cannot {action} while the editor is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
