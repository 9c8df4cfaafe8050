//! The local event collection and its incremental patching.
//!
//! Range changes replace the collection wholesale; create, update and
//! delete results from the store are patched in place so the view never
//! needs a refetch after a write. Every operation leaves the collection
//! sorted by (date, start time), with equal keys in arrival order.

use chrono::NaiveDate;

use super::error::ReconcileError;
use super::sorting::{is_sorted, sort_events};
use super::types::{Event, EventId};

/// Ordered collection of the events in the visible range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCollection {
    events: Vec<Event>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection.
    pub fn load(&mut self, mut events: Vec<Event>) {
        sort_events(&mut events);
        self.events = events;
    }

    /// Inserts a newly created event at its sorted position.
    pub fn apply_create(&mut self, event: Event) -> Result<(), ReconcileError> {
        if self.position(&event.id).is_some() {
            return Err(ReconcileError::DuplicateEvent(event.id));
        }

        self.insert_sorted(event);
        Ok(())
    }

    /// Replaces an existing event, moving it if its date or start time changed.
    pub fn apply_update(&mut self, event: Event) -> Result<(), ReconcileError> {
        let Some(index) = self.position(&event.id) else {
            return Err(ReconcileError::NotFound(event.id));
        };

        if self.events[index].sort_key() == event.sort_key() {
            self.events[index] = event;
        } else {
            self.events.remove(index);
            self.insert_sorted(event);
        }
        Ok(())
    }

    /// Removes an event. Unknown ids are ignored.
    pub fn apply_delete(&mut self, id: &EventId) -> Option<Event> {
        self.position(id).map(|index| self.events.remove(index))
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Events on a single day, in start-time order.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.date == date)
    }

    pub fn is_sorted(&self) -> bool {
        is_sorted(&self.events)
    }

    fn position(&self, id: &EventId) -> Option<usize> {
        self.events.iter().position(|e| &e.id == id)
    }

    fn insert_sorted(&mut self, event: Event) {
        let key = event.sort_key();
        let index = self.events.partition_point(|e| e.sort_key() <= key);
        self.events.insert(index, event);
    }
}

impl<'a> IntoIterator for &'a EventCollection {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
