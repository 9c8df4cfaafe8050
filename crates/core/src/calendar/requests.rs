//! Wire types shared by the server and client.
//!
//! Every API response is wrapped in the [`ApiResponse`] envelope:
//! `{ success, data?, error?, message? }`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::serde::{parse_date, DATE_FORMAT};
use crate::storage::DateRange;

/// The JSON envelope around every API response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Converts the envelope into its payload, or the server's error text.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error
                .or(self.message)
                .unwrap_or_else(|| "Unknown error".to_string()))
        }
    }
}

impl ApiResponse<()> {
    /// A successful response that carries only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    /// A failed response.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

/// Errors in the range query string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeQueryError {
    #[error("Missing required query parameter: {0}")]
    Missing(&'static str),
    #[error("Invalid {param}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { param: &'static str, value: String },
    #[error("start_date must be before or equal to end_date")]
    InvalidRange,
}

/// Query parameters for `GET /api/events`.
///
/// Dates are kept as text so that missing and malformed values produce a
/// proper error envelope instead of a bare extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl RangeQuery {
    pub fn new(range: DateRange) -> Self {
        Self {
            start_date: Some(range.start.format(DATE_FORMAT).to_string()),
            end_date: Some(range.end.format(DATE_FORMAT).to_string()),
        }
    }

    /// Parses and checks both bounds.
    pub fn to_range(&self) -> Result<DateRange, RangeQueryError> {
        let start = required_date("start_date", self.start_date.as_deref())?;
        let end = required_date("end_date", self.end_date.as_deref())?;
        DateRange::new(start, end).map_err(|_| RangeQueryError::InvalidRange)
    }
}

fn required_date(param: &'static str, value: Option<&str>) -> Result<NaiveDate, RangeQueryError> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .ok_or(RangeQueryError::Missing(param))?;
    parse_date(value).map_err(|_| RangeQueryError::InvalidDate {
        param,
        value: value.to_string(),
    })
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    pub fn ok(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "OK".to_string(),
            timestamp,
        }
    }
}
