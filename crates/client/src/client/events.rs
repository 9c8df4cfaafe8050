//! Event API operations.

use calgrid_core::calendar::{ApiResponse, Event, EventId, EventInput, RangeQuery};
use calgrid_core::storage::DateRange;

use super::CalgridClient;
use crate::error::{ClientError, Result};

impl CalgridClient {
    /// List events whose date falls within `range`.
    pub async fn list_events(&self, range: DateRange) -> Result<Vec<Event>> {
        let response = self
            .client
            .get(self.url("/api/events"))
            .query(&RangeQuery::new(range))
            .send()
            .await?;
        self.handle_data(response).await
    }

    /// Get an event by ID.
    pub async fn get_event(&self, id: &EventId) -> Result<Event> {
        let response = self
            .client
            .get(self.url(&format!("/api/events/{}", id)))
            .send()
            .await?;
        self.handle_data(response).await
    }

    /// Create an event. The server assigns the ID.
    pub async fn create_event(&self, input: &EventInput) -> Result<Event> {
        let response = self
            .client
            .post(self.url("/api/events"))
            .json(input)
            .send()
            .await?;
        self.handle_data(response).await
    }

    /// Replace the fields of an event.
    pub async fn update_event(&self, id: &EventId, input: &EventInput) -> Result<Event> {
        let response = self
            .client
            .put(self.url(&format!("/api/events/{}", id)))
            .json(input)
            .send()
            .await?;
        self.handle_data(response).await
    }

    /// Delete an event. Returns the server's confirmation message.
    pub async fn delete_event(&self, id: &EventId) -> Result<String> {
        let response = self
            .client
            .delete(self.url(&format!("/api/events/{}", id)))
            .send()
            .await?;
        let envelope: ApiResponse<serde_json::Value> = self.handle_response(response).await?;
        envelope
            .message
            .ok_or_else(|| ClientError::InvalidResponse("response has no message".to_string()))
    }
}
