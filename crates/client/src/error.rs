//! Client error types.

use std::time::Duration;

use calgrid_core::calendar::{EditorError, ReconcileError};
use calgrid_core::storage::{DateRangeError, RepositoryError};
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("{0} view is not implemented")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Range(#[from] DateRangeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Converts a transport or API error into the store error taxonomy.
    ///
    /// `id` names the event the request was about, if any.
    pub fn into_repository_error(self, id: Option<&str>) -> RepositoryError {
        match self {
            ClientError::Repository(e) => e,
            ClientError::NotFound { message } => match id {
                Some(id) => RepositoryError::event_not_found(id),
                None => RepositoryError::QueryFailed(message),
            },
            ClientError::ServerError { status: 503, message } => {
                RepositoryError::Unavailable(message)
            }
            ClientError::ServerError {
                status: 400..=499,
                message,
            } => RepositoryError::InvalidData(message),
            ClientError::ServerError { message, .. } => RepositoryError::QueryFailed(message),
            ClientError::Request(e) if e.is_connect() || e.is_timeout() => {
                RepositoryError::Unavailable(e.to_string())
            }
            ClientError::Timeout(after) => {
                RepositoryError::Unavailable(format!("no answer within {after:?}"))
            }
            ClientError::InvalidResponse(message) => RepositoryError::Serialization(message),
            ClientError::Json(e) => RepositoryError::Serialization(e.to_string()),
            other => RepositoryError::QueryFailed(other.to_string()),
        }
    }
}
