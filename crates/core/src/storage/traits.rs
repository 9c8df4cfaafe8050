use async_trait::async_trait;

use crate::calendar::{Event, EventId, EventInput};

use super::{DateRange, Result};

/// Persistent storage for calendar events.
///
/// Implemented by the server's SQLite and in-memory repositories and by the
/// client's HTTP store, so the view layer can run against any of them.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Returns all events whose date falls within `range` (inclusive).
    async fn query(&self, range: DateRange) -> Result<Vec<Event>>;

    /// Gets an event by its ID.
    async fn get(&self, id: &EventId) -> Result<Option<Event>>;

    /// Persists a new event and returns it with its assigned ID.
    async fn insert(&self, input: &EventInput) -> Result<Event>;

    /// Replaces the fields of an existing event.
    ///
    /// Returns `RepositoryError::NotFound` if no event has this ID.
    async fn update(&self, id: &EventId, input: &EventInput) -> Result<Event>;

    /// Deletes an event by its ID.
    ///
    /// Returns `RepositoryError::NotFound` if no event has this ID.
    async fn delete(&self, id: &EventId) -> Result<()>;
}
