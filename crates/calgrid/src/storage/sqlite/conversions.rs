//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use calgrid_core::calendar::{Event, EventId};
use calgrid_core::serde::{format_time, parse_date, parse_time, DATE_FORMAT};
use calgrid_core::storage::RepositoryError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

/// Convert a SQLite row to an Event.
///
/// Expected columns: id, title, date, start_time, end_time, description, created_at, updated_at
pub fn row_to_event(row: &Row) -> rusqlite::Result<Event> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let date: String = row.get(2)?;
    let start_time: String = row.get(3)?;
    let end_time: String = row.get(4)?;
    let description: Option<String> = row.get(5)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Event {
        id: EventId::from(id),
        title,
        date: date_column(2, &date)?,
        start_time: time_column(3, &start_time)?,
        end_time: time_column(4, &end_time)?,
        description: description.filter(|d| !d.trim().is_empty()),
        created_at: Some(datetime_column(6, &created_at)?),
        updated_at: Some(datetime_column(7, &updated_at)?),
    })
}

/// Parse a store id. SQLite row ids are integers; any other id cannot exist.
pub fn parse_row_id(id: &EventId) -> Result<i64, RepositoryError> {
    id.as_str()
        .parse()
        .map_err(|_| RepositoryError::event_not_found(id))
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
///
/// Dates are stored as text so that lexicographic order is date order.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a NaiveTime for SQLite storage (HH:MM).
pub fn format_time_column(time: &NaiveTime) -> String {
    format_time(time)
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn date_column(column: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    parse_date(s).map_err(|e| conversion_error(column, e))
}

fn time_column(column: usize, s: &str) -> rusqlite::Result<NaiveTime> {
    parse_time(s).map_err(|e| conversion_error(column, e))
}

fn datetime_column(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn query_event(sql: &str) -> rusqlite::Result<Event> {
        let conn = Connection::open_in_memory().unwrap();
        conn.query_row(sql, [], row_to_event)
    }

    #[test]
    fn test_row_to_event() {
        let event = query_event(
            "SELECT 7, 'Standup', '2024-03-18', '09:00', '09:15', '', \
             '2024-03-01T10:00:00+00:00', '2024-03-02T10:00:00+00:00'",
        )
        .unwrap();

        assert_eq!(event.id, EventId::new("7"));
        assert_eq!(event.title, "Standup");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        assert_eq!(event.end_time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(event.description, None);
        assert!(event.created_at.unwrap() < event.updated_at.unwrap());
    }

    #[test]
    fn test_row_to_event_accepts_seconds() {
        let event = query_event(
            "SELECT 1, 'Lunch', '2024-03-18', '12:00:00', '13:00:00', 'Tacos', \
             '2024-03-01T10:00:00+00:00', '2024-03-01T10:00:00+00:00'",
        )
        .unwrap();

        assert_eq!(event.start_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(event.description.as_deref(), Some("Tacos"));
    }

    #[test]
    fn test_row_to_event_rejects_bad_date() {
        let result = query_event(
            "SELECT 1, 'Lunch', 'yesterday', '12:00', '13:00', NULL, \
             '2024-03-01T10:00:00+00:00', '2024-03-01T10:00:00+00:00'",
        );

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(2, _, _))
        ));
    }

    #[test]
    fn test_parse_row_id() {
        assert_eq!(parse_row_id(&EventId::new("42")), Ok(42));
        assert!(matches!(
            parse_row_id(&EventId::new("abc")),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_format_columns() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();

        assert_eq!(format_date(&date), "2024-03-05");
        assert_eq!(format_time_column(&time), "09:05");
    }
}
