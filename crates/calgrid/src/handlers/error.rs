use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calgrid_core::calendar::{ApiResponse, RangeQueryError, ValidationError};
use calgrid_core::storage::{repository_error_to_status_code, DateRangeError, RepositoryError};

/// Handler error. Rendered as an `ApiResponse` error envelope with a status
/// code derived from the wrapped error's type.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            return StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        }
        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return rejection.status();
        }
        if self.0.is::<ValidationError>()
            || self.0.is::<RangeQueryError>()
            || self.0.is::<DateRangeError>()
        {
            return StatusCode::BAD_REQUEST;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "API error");
        } else {
            tracing::warn!(status = %status, error = %message, "API error");
        }

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
