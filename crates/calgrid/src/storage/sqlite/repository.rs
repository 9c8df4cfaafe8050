//! SQLite event store.
//!
//! Implements `EventStore` from `calgrid_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;

use calgrid_core::calendar::{Event, EventId, EventInput};
use calgrid_core::storage::{DateRange, EventStore, RepositoryError, Result};

use super::conversions::{
    format_date, format_datetime, format_time_column, parse_row_id, row_to_event,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Column values for an insert or update, prepared outside the connection
/// thread.
struct EventColumns {
    title: String,
    date: String,
    start_time: String,
    end_time: String,
    description: Option<String>,
    timestamp: String,
}

impl EventColumns {
    fn new(input: &EventInput) -> Self {
        Self {
            title: input.title.clone(),
            date: format_date(&input.date),
            start_time: format_time_column(&input.start_time),
            end_time: format_time_column(&input.end_time),
            description: input.description.clone(),
            timestamp: format_datetime(&Utc::now()),
        }
    }
}

/// SQLite-backed event store.
///
/// All statements run on `tokio-rusqlite`'s connection thread, so writes
/// are serialized.
pub struct SqliteEventStore {
    conn: Connection,
}

impl SqliteEventStore {
    /// Opens (creating if needed) a file-based database and its schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a store backed by an in-memory database.
    ///
    /// Data is lost when the store is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn query(&self, range: DateRange) -> Result<Vec<Event>> {
        let start = format_date(&range.start);
        let end = format_date(&range.end);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_EVENTS_BY_DATE_RANGE)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&start, &end], row_to_event)
                    .map_err(wrap_err)?;

                let mut events = Vec::new();
                for row_result in rows {
                    events.push(row_result.map_err(wrap_err)?);
                }
                Ok(events)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, range.to_string()))
    }

    async fn get(&self, id: &EventId) -> Result<Option<Event>> {
        let Ok(row_id) = parse_row_id(id) else {
            return Ok(None);
        };

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_EVENT_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([row_id], row_to_event) {
                    Ok(event) => Ok(Some(event)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, id.as_str()))
    }

    async fn insert(&self, input: &EventInput) -> Result<Event> {
        let columns = EventColumns::new(input);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_EVENT,
                    rusqlite::params![
                        columns.title,
                        columns.date,
                        columns.start_time,
                        columns.end_time,
                        columns.description,
                        columns.timestamp,
                        columns.timestamp
                    ],
                )
                .map_err(wrap_err)?;

                let row_id = conn.last_insert_rowid();
                conn.query_row(schema::SELECT_EVENT_BY_ID, [row_id], row_to_event)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "new"))
    }

    async fn update(&self, id: &EventId, input: &EventInput) -> Result<Event> {
        let row_id = parse_row_id(id)?;
        let columns = EventColumns::new(input);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_EVENT,
                        rusqlite::params![
                            row_id,
                            columns.title,
                            columns.date,
                            columns.start_time,
                            columns.end_time,
                            columns.description,
                            columns.timestamp
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }

                conn.query_row(schema::SELECT_EVENT_BY_ID, [row_id], row_to_event)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, id.as_str()))
    }

    async fn delete(&self, id: &EventId) -> Result<()> {
        let row_id = parse_row_id(id)?;

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_EVENT, [row_id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::calendar::is_sorted;
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
    async fn test_first_insert_gets_id_one() {
        let store = SqliteEventStore::new_in_memory().await.unwrap();

        let event = store.insert(&standup()).await.unwrap();

        assert_eq!(event.id, EventId::new("1"));
        assert_eq!(event.title, "Standup");
        assert_eq!(event.start_time, time(9, 0));
        assert!(event.created_at.is_some());
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = SqliteEventStore::new_in_memory().await.unwrap();
        let input = standup().with_description("Daily sync");

        let created = store.insert(&input).await.unwrap();
        let retrieved = store.get(&created.id).await.unwrap();

        assert_eq!(retrieved, Some(created));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store = SqliteEventStore::new_in_memory().await.unwrap();

        assert_eq!(store.get(&EventId::new("99")).await.unwrap(), None);
        assert_eq!(store.get(&EventId::new("not-a-row")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_query_is_inclusive_and_ordered() {
        let store = SqliteEventStore::new_in_memory().await.unwrap();
        let inputs = [
            EventInput::new("Late", date(2024, 3, 18), time(16, 0), time(17, 0)),
            EventInput::new("Before", date(2024, 2, 24), time(9, 0), time(10, 0)),
            EventInput::new("First day", date(2024, 2, 25), time(9, 0), time(10, 0)),
            EventInput::new("Early", date(2024, 3, 18), time(8, 0), time(9, 0)),
            EventInput::new("Last day", date(2024, 4, 7), time(9, 0), time(10, 0)),
            EventInput::new("After", date(2024, 4, 8), time(9, 0), time(10, 0)),
        ];
        for input in &inputs {
            store.insert(input).await.unwrap();
        }

        let range = DateRange::new(date(2024, 2, 25), date(2024, 4, 7)).unwrap();
        let events = store.query(range).await.unwrap();

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First day", "Early", "Late", "Last day"]);
        assert!(is_sorted(&events));
    }

    #[tokio::test]
    async fn test_update_moves_date() {
        let store = SqliteEventStore::new_in_memory().await.unwrap();
        let created = store.insert(&standup()).await.unwrap();

        let mut input = created.to_input();
        input.date = date(2024, 3, 20);
        let updated = store.update(&created.id, &input).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, date(2024, 3, 20));
        assert_eq!(updated.created_at, created.created_at);

        let old_day = store.query(DateRange::day(date(2024, 3, 18))).await.unwrap();
        assert!(old_day.is_empty());
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let store = SqliteEventStore::new_in_memory().await.unwrap();

        let result = store.update(&EventId::new("42"), &standup()).await;

        assert_eq!(result, Err(RepositoryError::event_not_found("42")));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = SqliteEventStore::new_in_memory().await.unwrap();
        let created = store.insert(&standup()).await.unwrap();

        store.delete(&created.id).await.unwrap();

        assert_eq!(store.get(&created.id).await.unwrap(), None);
        assert!(matches!(
            store.delete(&created.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = SqliteEventStore::new_in_memory().await.unwrap();
        let first = store.insert(&standup()).await.unwrap();
        store.delete(&first.id).await.unwrap();

        let second = store.insert(&standup()).await.unwrap();

        assert_eq!(second.id, EventId::new("2"));
    }
}
