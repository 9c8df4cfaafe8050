//! In-memory event store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use calgrid_core::calendar::{sort_events, Event, EventId, EventInput};
use calgrid_core::storage::{DateRange, EventStore, RepositoryError, Result};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    events: BTreeMap<i64, Event>,
}

/// In-memory storage backend.
///
/// Ids are assigned from a counter starting at 1 and never reused, like
/// SQLite's `AUTOINCREMENT`. Data is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryEventStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(id: &EventId) -> Option<i64> {
    id.as_str().parse().ok()
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn query(&self, range: DateRange) -> Result<Vec<Event>> {
        let inner = self.inner.read().await;
        let mut events: Vec<Event> = inner
            .events
            .values()
            .filter(|e| range.contains(e.date))
            .cloned()
            .collect();
        sort_events(&mut events);
        Ok(events)
    }

    async fn get(&self, id: &EventId) -> Result<Option<Event>> {
        let inner = self.inner.read().await;
        Ok(key(id).and_then(|k| inner.events.get(&k)).cloned())
    }

    async fn insert(&self, input: &EventInput) -> Result<Event> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let row_id = inner.next_id;

        let now = Utc::now();
        let event =
            Event::from_input(EventId::from(row_id), input.clone()).with_timestamps(now, now);
        inner.events.insert(row_id, event.clone());
        Ok(event)
    }

    async fn update(&self, id: &EventId, input: &EventInput) -> Result<Event> {
        let mut inner = self.inner.write().await;
        let existing = key(id)
            .and_then(|k| inner.events.get_mut(&k))
            .ok_or_else(|| RepositoryError::event_not_found(id))?;

        let created_at = existing.created_at.unwrap_or_else(Utc::now);
        *existing =
            Event::from_input(id.clone(), input.clone()).with_timestamps(created_at, Utc::now());
        Ok(existing.clone())
    }

    async fn delete(&self, id: &EventId) -> Result<()> {
        let mut inner = self.inner.write().await;
        key(id)
            .and_then(|k| inner.events.remove(&k))
            .map(|_| ())
            .ok_or_else(|| RepositoryError::event_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn standup() -> EventInput {
        EventInput::new("Standup", date(2024, 3, 18), time(9, 0), time(9, 15))
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryEventStore::new();

        let first = store.insert(&standup()).await.unwrap();
        let second = store.insert(&standup()).await.unwrap();

        assert_eq!(first.id, EventId::new("1"));
        assert_eq!(second.id, EventId::new("2"));
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryEventStore::new();

        let created = store.insert(&standup()).await.unwrap();

        assert_eq!(store.get(&created.id).await.unwrap(), Some(created));
        assert_eq!(store.get(&EventId::new("nope")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_query_filters_and_sorts() {
        let store = InMemoryEventStore::new();
        store
            .insert(&EventInput::new("Late", date(2024, 3, 18), time(16, 0), time(17, 0)))
            .await
            .unwrap();
        store
            .insert(&EventInput::new("Early", date(2024, 3, 18), time(8, 0), time(9, 0)))
            .await
            .unwrap();
        store
            .insert(&EventInput::new("Outside", date(2024, 5, 1), time(8, 0), time(9, 0)))
            .await
            .unwrap();

        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let titles: Vec<String> = store
            .query(range)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(titles, vec!["Early", "Late"]);
    }

    #[tokio::test]
    async fn test_update() {
        let store = InMemoryEventStore::new();
        let created = store.insert(&standup()).await.unwrap();

        let mut input = created.to_input();
        input.date = date(2024, 3, 20);
        let updated = store.update(&created.id, &input).await.unwrap();

        assert_eq!(updated.date, date(2024, 3, 20));
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.get(&created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let store = InMemoryEventStore::new();

        let result = store.update(&EventId::new("7"), &standup()).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryEventStore::new();
        let created = store.insert(&standup()).await.unwrap();

        store.delete(&created.id).await.unwrap();

        assert_eq!(store.get(&created.id).await.unwrap(), None);
        assert!(matches!(
            store.delete(&created.id).await,
            Err(RepositoryError::NotFound { .. })
        ));

        let next = store.insert(&standup()).await.unwrap();
        assert_eq!(next.id, EventId::new("2"));
    }
}
