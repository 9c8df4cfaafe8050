use super::error::ValidationError;
use super::types::{DraftField, EventDraft, EventInput};
use crate::serde::{parse_date, parse_time};

/// Validates an editor draft and converts it into a store payload.
///
/// Checks run in a fixed order so the first problem reported is stable:
/// required fields (title, date, start time, end time), then field formats,
/// then that the end time is strictly after the start time on the same day.
pub fn validate_draft(draft: &EventDraft) -> Result<EventInput, ValidationError> {
    if let Some(field) = DraftField::REQUIRED
        .into_iter()
        .find(|field| draft.get(*field).trim().is_empty())
    {
        return Err(ValidationError::MissingField(field));
    }

    let date = parse_date(&draft.date).map_err(|_| invalid(DraftField::Date, &draft.date))?;
    let start_time = parse_time(&draft.start_time)
        .map_err(|_| invalid(DraftField::StartTime, &draft.start_time))?;
    let end_time =
        parse_time(&draft.end_time).map_err(|_| invalid(DraftField::EndTime, &draft.end_time))?;

    if date.and_time(end_time) <= date.and_time(start_time) {
        return Err(ValidationError::InvalidTimeRange);
    }

    let description = Some(draft.description.clone()).filter(|d| !d.trim().is_empty());

    Ok(EventInput {
        title: draft.title.clone(),
        date,
        start_time,
        end_time,
        description,
    })
}

fn invalid(field: DraftField, value: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn draft(title: &str, date: &str, start: &str, end: &str) -> EventDraft {
        EventDraft {
            id: None,
            title: title.to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let input = validate_draft(&draft("Standup", "2024-03-18", "09:00", "09:15")).unwrap();

        assert_eq!(input.title, "Standup");
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        assert_eq!(input.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(input.end_time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        assert_eq!(
            validate_draft(&draft("", "", "", "")),
            Err(ValidationError::MissingField(DraftField::Title))
        );
        assert_eq!(
            validate_draft(&draft("Standup", " ", "", "")),
            Err(ValidationError::MissingField(DraftField::Date))
        );
        assert_eq!(
            validate_draft(&draft("Standup", "2024-03-18", "", "")),
            Err(ValidationError::MissingField(DraftField::StartTime))
        );
        assert_eq!(
            validate_draft(&draft("Standup", "2024-03-18", "09:00", "")),
            Err(ValidationError::MissingField(DraftField::EndTime))
        );
    }

    #[test]
    fn test_equal_times_rejected() {
        assert_eq!(
            validate_draft(&draft("Standup", "2024-03-18", "09:00", "09:00")),
            Err(ValidationError::InvalidTimeRange)
        );
    }

    #[test]
    fn test_end_before_start_rejected() {
        assert_eq!(
            validate_draft(&draft("Standup", "2024-03-18", "10:00", "09:00")),
            Err(ValidationError::InvalidTimeRange)
        );
    }

    #[test]
    fn test_times_compared_at_minute_precision() {
        assert_eq!(
            validate_draft(&draft("Standup", "2024-03-18", "09:00:10", "09:00:50")),
            Err(ValidationError::InvalidTimeRange)
        );

        let input = validate_draft(&draft("Standup", "2024-03-18", "09:00:59", "09:01:00")).unwrap();
        assert_eq!(input.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(input.end_time, NaiveTime::from_hms_opt(9, 1, 0).unwrap());
    }

    #[test]
    fn test_cross_midnight_rejected() {
        assert_eq!(
            validate_draft(&draft("Late shift", "2024-03-18", "23:00", "01:00")),
            Err(ValidationError::InvalidTimeRange)
        );
    }

    #[test]
    fn test_invalid_formats() {
        assert!(matches!(
            validate_draft(&draft("Standup", "next monday", "09:00", "10:00")),
            Err(ValidationError::InvalidFormat {
                field: DraftField::Date,
                ..
            })
        ));
        assert!(matches!(
            validate_draft(&draft("Standup", "2024-03-18", "9am", "10:00")),
            Err(ValidationError::InvalidFormat {
                field: DraftField::StartTime,
                ..
            })
        ));
        assert!(matches!(
            validate_draft(&draft("Standup", "2024-02-30", "09:00", "10:00")),
            Err(ValidationError::InvalidFormat {
                field: DraftField::Date,
                ..
            })
        ));
    }

    #[test]
    fn test_blank_description_is_none() {
        let mut d = draft("Standup", "2024-03-18", "09:00", "09:15");
        d.description = "   ".to_string();
        assert_eq!(validate_draft(&d).unwrap().description, None);

        d.description = "Daily sync".to_string();
        assert_eq!(
            validate_draft(&d).unwrap().description,
            Some("Daily sync".to_string())
        );
    }

    #[test]
    fn test_draft_is_not_modified() {
        let d = draft("Standup", "2024-03-18", "09:00", "09:15");
        let before = d.clone();
        let _ = validate_draft(&d);
        assert_eq!(d, before);
    }
}
