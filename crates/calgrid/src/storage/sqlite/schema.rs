//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create the events table and its index.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_date_start ON events(date, start_time);
"#;

pub const INSERT_EVENT: &str = r#"
INSERT INTO events (title, date, start_time, end_time, description, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_EVENT_BY_ID: &str = r#"
SELECT id, title, date, start_time, end_time, description, created_at, updated_at
FROM events
WHERE id = ?1
"#;

pub const SELECT_EVENTS_BY_DATE_RANGE: &str = r#"
SELECT id, title, date, start_time, end_time, description, created_at, updated_at
FROM events
WHERE date BETWEEN ?1 AND ?2
ORDER BY date ASC, start_time ASC, id ASC
"#;

pub const UPDATE_EVENT: &str = r#"
UPDATE events
SET title = ?2, date = ?3, start_time = ?4, end_time = ?5, description = ?6, updated_at = ?7
WHERE id = ?1
"#;

pub const DELETE_EVENT: &str = r#"
DELETE FROM events
WHERE id = ?1
"#;
