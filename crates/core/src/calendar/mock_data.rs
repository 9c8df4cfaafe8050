//! Demo events for seeding an empty store.
//!
//! Pure functions, usable from unit tests and from the server's `--seed`
//! flag.

use chrono::{Duration, NaiveDate, NaiveTime};

use super::types::EventInput;

const TITLES: [&str; 10] = [
    "Standup Meeting",
    "Lunch with Team",
    "Product Review",
    "Gym Session",
    "Team Sync",
    "Coffee with Mentor",
    "Doctor Appointment",
    "Code Review",
    "Sprint Planning",
    "1:1 Meeting",
];

const DESCRIPTIONS: [Option<&str>; 4] = [
    None,
    Some("Bring notes from last week"),
    None,
    Some("Room 4B"),
];

/// Generate `count` events spread over the two weeks around `center_date`.
///
/// Start times cycle through the working day from 08:00 and every event
/// lasts between 30 and 90 minutes, so all generated inputs pass
/// validation.
///
/// # Example
///
/// ```
/// use calgrid_core::calendar::generate_seed_events;
/// use chrono::NaiveDate;
///
/// let center = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let events = generate_seed_events(center, 20);
///
/// assert_eq!(events.len(), 20);
/// ```
pub fn generate_seed_events(center_date: NaiveDate, count: u32) -> Vec<EventInput> {
    let time = |minutes: i64| NaiveTime::MIN + Duration::minutes(minutes);

    (0..count)
        .map(|i| {
            let i = i as usize;
            let date = center_date + Duration::days((i % 14) as i64 - 7);
            let start = 8 * 60 + ((i * 3) % 10) as i64 * 60;
            let length = 30 + (i % 3) as i64 * 30;
            let title = TITLES[i % TITLES.len()];

            let input = EventInput::new(title, date, time(start), time(start + length));
            match DESCRIPTIONS[i % DESCRIPTIONS.len()] {
                Some(description) => input.with_description(description),
                None => input,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_seed_events_count() {
        let center = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        assert_eq!(generate_seed_events(center, 20).len(), 20);
        assert_eq!(generate_seed_events(center, 100).len(), 100);
        assert!(generate_seed_events(center, 0).is_empty());
    }

    #[test]
    fn test_generated_events_are_valid() {
        let center = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        for event in generate_seed_events(center, 50) {
            assert!(event.start_time < event.end_time, "{event:?}");
            assert!((center - event.date).num_days().abs() <= 7);
            assert!(!event.title.is_empty());
        }
    }
}
