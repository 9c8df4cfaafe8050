//! In-memory storage backend.
//!
//! Stores events in a `BTreeMap` behind `Arc<RwLock<_>>`. Used by the
//! `inmemory` feature and by router tests.

mod repository;

pub use repository::InMemoryEventStore;
