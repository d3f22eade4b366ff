//! `/notes` resource handlers.
//!
//! Handlers stay thin: parse, call [`notes::NoteService`], map the result.
//! Validation, not-found and store faults come back as [`NoteError`] and are
//! turned into responses by [`ServerError`].
//!
//! [`NoteError`]: notes::NoteError

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use notes::{NewNote, Note, NoteId, NoteUpdate};
use std::sync::Arc;

/// List every note, newest first.
pub async fn list_notes(State(state): State<Arc<ServerState>>) -> ServerResult<Json<Vec<Note>>> {
    let notes = state.notes.list().await?;
    Ok(Json(notes))
}

/// Fetch a single note.
pub async fn get_note(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Note>> {
    let note = state.notes.get(&NoteId::from(id)).await?;
    Ok(Json(note))
}

/// Create a note. Responds 201 with the stored note.
pub async fn create_note(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<NewNote>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(input) = body?;
    let note = state.notes.create(input).await?;
    tracing::info!(id = %note.id, "Note created");
    Ok((StatusCode::CREATED, Json(note)))
}

/// Replace any subset of `title` / `content`.
pub async fn update_note(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    body: Result<Json<NoteUpdate>, JsonRejection>,
) -> ServerResult<Json<Note>> {
    let Json(update) = body?;
    let note = state.notes.update(&NoteId::from(id), update).await?;
    Ok(Json(note))
}

/// Hard delete. Responds 204 with no body.
pub async fn delete_note(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let id = NoteId::from(id);
    state.notes.delete(&id).await?;
    tracing::info!(id = %id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}
