//! Month-view orchestration on top of any [`EventStore`].
//!
//! [`EventStore`]: calgrid_core::storage::EventStore

mod controller;
mod fetcher;

pub use controller::CalendarController;
pub use fetcher::{fetch_range, try_fetch_range};

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use calgrid_core::calendar::{Event, EventId, EventInput};
    use calgrid_core::storage::{DateRange, EventStore, RepositoryError, Result};
    use chrono::{NaiveDate, NaiveTime};

    pub fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub fn make_time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    pub fn make_event(id: &str, date: NaiveDate, hour: u32, title: &str) -> Event {
        Event::from_input(
            EventId::new(id),
            EventInput::new(title, date, make_time(hour, 0), make_time(hour + 1, 0)),
        )
    }

    /// In-memory store with sequential ids and switchable failure modes.
    #[derive(Default)]
    pub struct FakeStore {
        state: Mutex<FakeState>,
    }

    #[derive(Default)]
    struct FakeState {
        next_id: i64,
        events: BTreeMap<i64, Event>,
        fail_reads: bool,
        fail_writes: bool,
        hang_reads: bool,
        queries: Vec<DateRange>,
    }

    impl FakeStore {
        pub fn with_events(events: Vec<Event>) -> Self {
            let store = Self::default();
            {
                let mut state = store.state.lock().unwrap();
                for event in events {
                    let id: i64 = event.id.as_str().parse().unwrap();
                    state.next_id = state.next_id.max(id);
                    state.events.insert(id, event);
                }
            }
            store
        }

        pub fn fail_reads(self) -> Self {
            self.state.lock().unwrap().fail_reads = true;
            self
        }

        pub fn fail_writes(self) -> Self {
            self.state.lock().unwrap().fail_writes = true;
            self
        }

        pub fn hang_reads(self) -> Self {
            self.state.lock().unwrap().hang_reads = true;
            self
        }

        pub fn set_fail_writes(&self, fail: bool) {
            self.state.lock().unwrap().fail_writes = fail;
        }

        pub fn queries(&self) -> Vec<DateRange> {
            self.state.lock().unwrap().queries.clone()
        }

        pub fn stored(&self) -> Vec<Event> {
            self.state.lock().unwrap().events.values().cloned().collect()
        }

        fn check_write(&self) -> Result<()> {
            if self.state.lock().unwrap().fail_writes {
                return Err(RepositoryError::Unavailable("database is locked".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl EventStore for FakeStore {
        async fn query(&self, range: DateRange) -> Result<Vec<Event>> {
            let hang = {
                let mut state = self.state.lock().unwrap();
                state.queries.push(range);
                if state.fail_reads {
                    return Err(RepositoryError::Unavailable("connection refused".to_string()));
                }
                state.hang_reads
            };
            if hang {
                std::future::pending::<()>().await;
            }

            // Reverse id order so callers cannot rely on the store sorting.
            let state = self.state.lock().unwrap();
            Ok(state
                .events
                .values()
                .rev()
                .filter(|e| range.contains(e.date))
                .cloned()
                .collect())
        }

        async fn get(&self, id: &EventId) -> Result<Option<Event>> {
            let state = self.state.lock().unwrap();
            Ok(id
                .as_str()
                .parse::<i64>()
                .ok()
                .and_then(|key| state.events.get(&key).cloned()))
        }

        async fn insert(&self, input: &EventInput) -> Result<Event> {
            self.check_write()?;
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let id = state.next_id;
            let event = Event::from_input(EventId::from(id), input.clone());
            state.events.insert(id, event.clone());
            Ok(event)
        }

        async fn update(&self, id: &EventId, input: &EventInput) -> Result<Event> {
            self.check_write()?;
            let mut state = self.state.lock().unwrap();
            let key = id
                .as_str()
                .parse::<i64>()
                .map_err(|_| RepositoryError::event_not_found(id))?;
            let slot = state
                .events
                .get_mut(&key)
                .ok_or_else(|| RepositoryError::event_not_found(id))?;
            *slot = Event::from_input(id.clone(), input.clone());
            Ok(slot.clone())
        }

        async fn delete(&self, id: &EventId) -> Result<()> {
            self.check_write()?;
            let mut state = self.state.lock().unwrap();
            id.as_str()
                .parse::<i64>()
                .ok()
                .and_then(|key| state.events.remove(&key))
                .map(|_| ())
                .ok_or_else(|| RepositoryError::event_not_found(id))
        }
    }
}
