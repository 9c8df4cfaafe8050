use async_trait::async_trait;
use calgrid_core::calendar::{Event, EventId, EventInput};
use calgrid_core::storage::{DateRange, EventStore, Result};

use super::CalgridClient;
use crate::error::ClientError;

#[async_trait]
impl EventStore for CalgridClient {
    async fn query(&self, range: DateRange) -> Result<Vec<Event>> {
        self.list_events(range)
            .await
            .map_err(|e| e.into_repository_error(None))
    }

    async fn get(&self, id: &EventId) -> Result<Option<Event>> {
        match self.get_event(id).await {
            Ok(event) => Ok(Some(event)),
            Err(ClientError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into_repository_error(Some(id.as_str()))),
        }
    }

    async fn insert(&self, input: &EventInput) -> Result<Event> {
        self.create_event(input)
            .await
            .map_err(|e| e.into_repository_error(None))
    }

    async fn update(&self, id: &EventId, input: &EventInput) -> Result<Event> {
        self.update_event(id, input)
            .await
            .map_err(|e| e.into_repository_error(Some(id.as_str())))
    }

    async fn delete(&self, id: &EventId) -> Result<()> {
        self.delete_event(id)
            .await
            .map(|_| ())
            .map_err(|e| e.into_repository_error(Some(id.as_str())))
    }
}
