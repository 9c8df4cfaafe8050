//! HTTP client for the calgrid API.

pub mod events;
pub mod health;
mod store;

use std::time::Duration;

use calgrid_core::calendar::ApiResponse;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

/// Server URL used when neither `--base-url` nor `CALGRID_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Default bound on a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the calgrid API.
///
/// Also implements [`calgrid_core::storage::EventStore`], so the month-view
/// controller can run against a remote server.
#[derive(Debug, Clone)]
pub struct CalgridClient {
    client: reqwest::Client,
    base_url: String,
}

impl CalgridClient {
    /// Create a new client with the given base URL and per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads a response body and unwraps its envelope.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>> {
        let status = response.status();
        let body = response.text().await?;
        decode_envelope(status, &body)
    }

    /// Like `handle_response`, but requires a `data` payload.
    async fn handle_data<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        self.handle_response(response)
            .await?
            .into_result()
            .map_err(ClientError::InvalidResponse)?
            .ok_or_else(|| ClientError::InvalidResponse("response has no data".to_string()))
    }
}

/// Decodes an API envelope, turning non-2xx statuses and `success: false`
/// bodies into errors carrying the server's message.
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<ApiResponse<T>> {
    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.into_result().err())
            .unwrap_or_else(|| body.to_string());

        return Err(if status == StatusCode::NOT_FOUND {
            ClientError::NotFound { message }
        } else {
            ClientError::ServerError {
                status: status.as_u16(),
                message,
            }
        });
    }

    let envelope: ApiResponse<T> =
        serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        });
    }

    Ok(envelope)
}
