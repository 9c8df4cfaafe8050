//! Event CRUD handlers.
//!
//! Create and update bodies are deserialized as raw drafts and run through
//! the same validator the client uses before they reach the store.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use calgrid_core::calendar::{
    sort_events, validate_draft, ApiResponse, Event, EventDraft, EventId, RangeQuery,
};
use calgrid_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List events in an inclusive date range (GET /api/events?start_date&end_date).
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<ApiResponse<Vec<Event>>>, AppError> {
    let range = query.to_range()?;

    let mut events = state.store.query(range).await?;
    sort_events(&mut events);

    tracing::debug!(%range, count = events.len(), "Listed events");
    Ok(Json(ApiResponse::ok(events)))
}

/// Get a single event (GET /api/events/{id}).
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    let id = EventId::new(id);

    let event = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| RepositoryError::event_not_found(&id))?;

    Ok(Json(ApiResponse::ok(event)))
}

/// Create an event (POST /api/events).
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), AppError> {
    let Json(draft) = payload?;
    let input = validate_draft(&draft)?;

    let event = state.store.insert(&input).await?;

    tracing::info!(id = %event.id, date = %event.date, "Created event");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

/// Update an event (PUT /api/events/{id}).
///
/// The id in the path wins over any id in the body.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EventDraft>, JsonRejection>,
) -> Result<Json<ApiResponse<Event>>, AppError> {
    let id = EventId::new(id);
    let Json(draft) = payload?;
    let input = validate_draft(&draft)?;

    let event = state.store.update(&id, &input).await?;

    tracing::info!(id = %event.id, date = %event.date, "Updated event");
    Ok(Json(ApiResponse::ok(event)))
}

/// Delete an event (DELETE /api/events/{id}).
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = EventId::new(id);

    state.store.delete(&id).await?;

    tracing::info!(%id, "Deleted event");
    Ok(Json(ApiResponse::message(format!(
        "Event with id {id} deleted"
    ))))
}
