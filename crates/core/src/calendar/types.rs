use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::serde::{
    deserialize_optional_string, deserialize_string_or_empty, format_time, hh_mm, DATE_FORMAT,
};

/// Default start time offered when a draft is opened from an empty cell.
pub const DEFAULT_START_TIME: &str = "09:00";

/// Default end time offered when a draft is opened from an empty cell.
pub const DEFAULT_END_TIME: &str = "10:00";

/// Store-assigned event identifier.
///
/// Always serialized as a JSON string. Deserialization also accepts a JSON
/// integer, since SQLite row ids were sent as numbers by older servers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EventId(s),
            RawId::Number(n) => EventId::from(n),
        })
    }
}

/// A persisted calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Assigned by the store. Not used by the view layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Builds a persisted event from a validated input and its assigned id.
    pub fn from_input(id: EventId, input: EventInput) -> Self {
        Self {
            id,
            title: input.title,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            description: input.description,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the store timestamps.
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        self
    }

    /// Sets the description for this event.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The key the local collection is ordered by.
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.start_time)
    }

    /// Strips the id and timestamps, keeping only the user-editable fields.
    pub fn to_input(&self) -> EventInput {
        EventInput {
            title: self.title.clone(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.clone(),
        }
    }
}

/// Validated event content without an id, as sent to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl EventInput {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            start_time,
            end_time,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An editable field of an [`EventDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Date,
    StartTime,
    EndTime,
    Description,
}

impl DraftField {
    /// Fields that must be non-empty, in the order they are checked.
    pub const REQUIRED: [DraftField; 4] = [
        DraftField::Title,
        DraftField::Date,
        DraftField::StartTime,
        DraftField::EndTime,
    ];

    /// The JSON field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Date => "date",
            DraftField::StartTime => "startTime",
            DraftField::EndTime => "endTime",
            DraftField::Description => "description",
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Date => "Date",
            DraftField::StartTime => "Start time",
            DraftField::EndTime => "End time",
            DraftField::Description => "Description",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw editor state for an event under construction.
///
/// Every field is kept as text so the editor can hold partial input; the
/// validator turns a draft into an [`EventInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub start_time: String,
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub end_time: String,
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub description: String,
}

impl EventDraft {
    /// A new draft for the clicked day, with the default one-hour slot.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            id: None,
            title: String::new(),
            date: date.format(DATE_FORMAT).to_string(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            description: String::new(),
        }
    }

    /// A draft pre-filled from an existing event.
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: Some(event.id.clone()),
            title: event.title.clone(),
            date: event.date.format(DATE_FORMAT).to_string(),
            start_time: format_time(&event.start_time),
            end_time: format_time(&event.end_time),
            description: event.description.clone().unwrap_or_default(),
        }
    }

    /// Returns true if this draft edits an already persisted event.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Date => &self.date,
            DraftField::StartTime => &self.start_time,
            DraftField::EndTime => &self.end_time,
            DraftField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Date => self.date = value,
            DraftField::StartTime => self.start_time = value,
            DraftField::EndTime => self.end_time = value,
            DraftField::Description => self.description = value,
        }
    }
}

/// One cell of the rendered month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    pub events: Vec<Event>,
}

impl DayCell {
    /// Returns true if this day has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events not shown when only `limit` fit in the cell.
    pub fn overflow(&self, limit: usize) -> usize {
        self.events.len().saturating_sub(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event() -> Event {
        Event::from_input(
            EventId::new("7"),
            EventInput::new(
                "Standup",
                NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
            ),
        )
    }

    #[test]
    fn test_event_id_accepts_number_and_string() {
        let from_number: EventId = serde_json::from_str("42").unwrap();
        let from_string: EventId = serde_json::from_str(r#""42""#).unwrap();

        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), r#""42""#);
    }

    #[test]
    fn test_event_wire_format() {
        let event = make_event();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], "7");
        assert_eq!(json["date"], "2024-03-18");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "09:15");
        assert!(json.get("description").is_none());
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_event_from_legacy_payload() {
        let json = r#"{
            "id": 3,
            "title": "Lunch",
            "date": "2024-03-18",
            "startTime": "12:00:00",
            "endTime": "13:00",
            "description": ""
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, EventId::new("3"));
        assert_eq!(event.start_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_draft_for_date_uses_default_slot() {
        let draft = EventDraft::for_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(draft.id, None);
        assert_eq!(draft.date, "2024-03-01");
        assert_eq!(draft.start_time, DEFAULT_START_TIME);
        assert_eq!(draft.end_time, DEFAULT_END_TIME);
        assert!(draft.title.is_empty());
    }

    #[test]
    fn test_draft_from_event_keeps_id() {
        let event = make_event().with_description("Daily sync");
        let draft = EventDraft::from_event(&event);

        assert!(draft.is_persisted());
        assert_eq!(draft.title, "Standup");
        assert_eq!(draft.start_time, "09:00");
        assert_eq!(draft.description, "Daily sync");
    }

    #[test]
    fn test_draft_set_and_get() {
        let mut draft = EventDraft::default();
        draft.set(DraftField::Title, "Retro");
        draft.set(DraftField::EndTime, "17:00");

        assert_eq!(draft.get(DraftField::Title), "Retro");
        assert_eq!(draft.get(DraftField::EndTime), "17:00");
        assert_eq!(draft.get(DraftField::Date), "");
    }

    #[test]
    fn test_draft_deserializes_nulls_as_empty() {
        let draft: EventDraft =
            serde_json::from_str(r#"{"title": null, "date": "2024-03-01"}"#).unwrap();

        assert_eq!(draft.title, "");
        assert_eq!(draft.date, "2024-03-01");
        assert_eq!(draft.start_time, "");
    }

    #[test]
    fn test_day_cell_overflow() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let cell = DayCell {
            date,
            in_month: true,
            is_today: false,
            events: vec![make_event(); 5],
        };

        assert_eq!(cell.overflow(3), 2);
        assert_eq!(cell.overflow(10), 0);
        assert!(!cell.is_empty());
    }
}
