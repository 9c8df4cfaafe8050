use std::future::Future;
use std::time::Duration;

use calgrid_core::calendar::{
    CalendarView, DraftField, Event, EventId, LoadOutcome, Navigation, RequestToken, ViewMode,
};
use calgrid_core::storage::{self, EventStore};
use chrono::NaiveDate;

use super::fetcher::try_fetch_range;
use crate::error::{ClientError, Result};

/// Drives a [`CalendarView`] against an event store.
///
/// Range fetches replace the local collection. Writes patch it with the
/// store's response and never trigger a refetch.
pub struct CalendarController<S> {
    store: S,
    view: CalendarView,
    timeout: Duration,
}

impl<S: EventStore> CalendarController<S> {
    /// Creates a controller showing the month of `anchor`. Nothing is loaded
    /// until [`refresh`](Self::refresh) is called.
    pub fn new(store: S, anchor: NaiveDate, timeout: Duration) -> Self {
        Self {
            store,
            view: CalendarView::new(anchor),
            timeout,
        }
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.view.set_mode(mode);
    }

    /// Reloads the visible range.
    pub async fn refresh(&mut self) -> LoadOutcome {
        let ticket = self.view.begin_fetch();
        let result = try_fetch_range(&self.store, ticket.range, self.timeout).await;
        self.apply_fetch(ticket.token, result)
    }

    /// Moves the anchor and reloads if the visible range changed.
    pub async fn navigate(&mut self, navigation: Navigation, today: NaiveDate) -> Option<LoadOutcome> {
        let ticket = self.view.navigate(navigation, today)?;
        let result = try_fetch_range(&self.store, ticket.range, self.timeout).await;
        Some(self.apply_fetch(ticket.token, result))
    }

    /// Applies the result of the fetch tagged `token`.
    ///
    /// A failed read empties the collection and marks the view failed.
    /// Responses to superseded tokens are dropped.
    pub fn apply_fetch(&mut self, token: RequestToken, result: Result<Vec<Event>>) -> LoadOutcome {
        match result {
            Ok(events) => {
                let outcome = self.view.finish_fetch(token, events);
                if outcome == LoadOutcome::Stale {
                    tracing::debug!(%token, "Discarded stale fetch");
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(%token, error = %e, "Failed to fetch events, showing none");
                let outcome = self.view.finish_fetch(token, Vec::new());
                if outcome == LoadOutcome::Applied {
                    self.view.fail_fetch(token, e.to_string());
                }
                outcome
            }
        }
    }

    /// Opens an empty draft for `date`.
    pub fn open_new(&mut self, date: NaiveDate) -> Result<()> {
        self.view.editor.open_for_date(date)?;
        Ok(())
    }

    /// Opens a draft for an existing event, loading it from the store if it
    /// is not in the visible range.
    pub async fn open_event(&mut self, id: &EventId) -> Result<()> {
        let event = match self.view.events.get(id) {
            Some(event) => event.clone(),
            None => self
                .bounded(self.store.get(id))
                .await?
                .ok_or_else(|| storage::RepositoryError::event_not_found(id))?,
        };
        self.view.editor.open_for_event(&event)?;
        Ok(())
    }

    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        self.view.editor.set_field(field, value)?;
        Ok(())
    }

    /// Validates and saves the open draft.
    ///
    /// On success the editor closes and the collection is patched with the
    /// stored event. On failure the editor reopens with the draft and the
    /// error message, and the error is returned.
    pub async fn submit(&mut self) -> Result<Event> {
        let submission = self.view.editor.submit()?;

        let result = match &submission.id {
            None => self.bounded(self.store.insert(&submission.input)).await,
            Some(id) => self.bounded(self.store.update(id, &submission.input)).await,
        };

        match result {
            Ok(event) => {
                self.view.editor.store_succeeded()?;
                // The write already happened; a local mismatch must not
                // report the save as failed.
                if let Err(e) = self.reconcile(&event) {
                    tracing::warn!(id = %event.id, error = %e, "Saved event could not be applied locally");
                }
                tracing::debug!(id = %event.id, "Saved event");
                Ok(event)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save event");
                self.view.editor.store_failed(e.to_string())?;
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.view.editor.cancel()?;
        Ok(())
    }

    /// Deletes an event, then removes it locally and closes the editor.
    pub async fn delete(&mut self, id: &EventId) -> Result<()> {
        self.bounded(self.store.delete(id)).await?;
        self.view.events.apply_delete(id);
        self.view.editor.cancel()?;
        tracing::debug!(%id, "Deleted event");
        Ok(())
    }

    /// Patches the collection with a stored event. Events saved outside the
    /// visible range are dropped from it.
    fn reconcile(&mut self, event: &Event) -> Result<()> {
        let visible = self.view.range().contains(event.date);
        let known = self.view.events.get(&event.id).is_some();

        match (visible, known) {
            (false, _) => {
                self.view.events.apply_delete(&event.id);
            }
            (true, true) => {
                self.view.events.apply_update(event.clone())?;
            }
            (true, false) => {
                self.view.events.apply_create(event.clone())?;
            }
        }
        Ok(())
    }

    async fn bounded<T>(&self, call: impl Future<Output = storage::Result<T>>) -> Result<T> {
        let value = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))??;
        Ok(value)
    }
}
