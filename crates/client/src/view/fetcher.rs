use std::time::Duration;

use calgrid_core::calendar::{sort_events, Event};
use calgrid_core::storage::{DateRange, EventStore};

use crate::error::{ClientError, Result};

/// Requests every event in `range`, bounded by `timeout`, sorted by date
/// then start time.
pub async fn try_fetch_range<S>(store: &S, range: DateRange, timeout: Duration) -> Result<Vec<Event>>
where
    S: EventStore + ?Sized,
{
    let mut events = tokio::time::timeout(timeout, store.query(range))
        .await
        .map_err(|_| ClientError::Timeout(timeout))??;

    sort_events(&mut events);
    tracing::debug!(%range, count = events.len(), "Fetched events");
    Ok(events)
}

/// Like [`try_fetch_range`], but a failed or timed out read yields an empty
/// list and a warning instead of an error.
pub async fn fetch_range<S>(store: &S, range: DateRange, timeout: Duration) -> Vec<Event>
where
    S: EventStore + ?Sized,
{
    try_fetch_range(store, range, timeout)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(%range, error = %e, "Failed to fetch events, showing none");
            Vec::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::test_support::{make_date, make_event, FakeStore};
    use calgrid_core::calendar::is_sorted;

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn march_range() -> DateRange {
        DateRange::new(make_date(2024, 2, 25), make_date(2024, 4, 7)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_sorted_events_in_range() {
        let store = FakeStore::with_events(vec![
            make_event("1", make_date(2024, 3, 18), 14, "Review"),
            make_event("2", make_date(2024, 3, 18), 9, "Standup"),
            make_event("3", make_date(2024, 2, 25), 10, "Leading edge"),
            make_event("4", make_date(2024, 4, 8), 10, "Outside"),
        ]);

        let events = fetch_range(&store, march_range(), TIMEOUT).await;

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Leading edge", "Standup", "Review"]);
        assert!(is_sorted(&events));
        assert_eq!(store.queries(), vec![march_range()]);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty() {
        let store = FakeStore::with_events(vec![make_event("1", make_date(2024, 3, 18), 9, "A")])
            .fail_reads();

        assert!(fetch_range(&store, march_range(), TIMEOUT).await.is_empty());
        assert!(matches!(
            try_fetch_range(&store, march_range(), TIMEOUT).await,
            Err(ClientError::Repository(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_timeout_degrades_to_empty() {
        let store = FakeStore::default().hang_reads();
        let timeout = Duration::from_millis(20);

        assert!(fetch_range(&store, march_range(), timeout).await.is_empty());
        assert!(matches!(
            try_fetch_range(&store, march_range(), timeout).await,
            Err(ClientError::Timeout(_))
        ));
    }
}
