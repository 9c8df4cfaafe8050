//! Application state shared by all request handlers.
//!
//! Storage is reached through an `EventStore` trait object; the concrete
//! backend is chosen by cargo feature.

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;

use calgrid_core::calendar::generate_seed_events;
use calgrid_core::storage::{EventStore, Result};

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Event store backend.
    pub store: Arc<dyn EventStore>,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl AppState {
    fn build(store: Arc<dyn EventStore>, config: &Config) -> Self {
        Self {
            store,
            request_timeout: config.request_timeout(),
        }
    }

    /// Inserts `count` demo events around `center`. Returns how many were
    /// written.
    pub async fn seed_demo_events(&self, center: NaiveDate, count: u32) -> Result<usize> {
        let inputs = generate_seed_events(center, count);
        for input in &inputs {
            self.store.insert(input).await?;
        }
        tracing::info!(count = inputs.len(), %center, "Seeded demo events");
        Ok(inputs.len())
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteEventStore;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            let store = Arc::new(SqliteEventStore::new(&config.sqlite_path).await?);
            tracing::info!(path = %config.sqlite_path, "Opened SQLite event store");
            Ok(Self::build(store, config))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryEventStore;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            tracing::info!("Using in-memory event store");
            Ok(Self::build(Arc::new(InMemoryEventStore::new()), config))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::storage::InMemoryEventStore;

    impl Default for AppState {
        /// Creates an AppState with in-memory storage for testing.
        fn default() -> Self {
            let config = Config {
                sqlite_path: String::new(),
                request_timeout_seconds: 10,
            };
            Self::build(Arc::new(InMemoryEventStore::new()), &config)
        }
    }

    #[tokio::test]
    async fn test_seed_demo_events() {
        let state = AppState::default();
        let center = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let written = state.seed_demo_events(center, 12).await.unwrap();

        let range = calgrid_core::calendar::visible_range(center);
        let stored = state.store.query(range).await.unwrap();
        assert_eq!(written, 12);
        assert_eq!(stored.len(), 12);
    }
}
