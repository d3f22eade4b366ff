//! Note use-case service.
//!
//! # Responsibility
//! - Validate every write before it reaches the store.
//! - Translate store results into exactly three failure kinds: validation,
//!   not-found and store fault.
//!
//! # Invariants
//! - Every stored note has non-empty, trimmed `title` and `content`.
//! - A rejected request performs no write.
//! - Each operation calls the store at most once per write; nothing is retried.

use crate::model::{NewNote, Note, NoteId, NoteUpdate};
use crate::store::{NoteStore, StoreError};
use crate::validate::{ValidationError, validate_new, validate_patch};
use std::sync::Arc;

/// Service error for note use-cases.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    /// Client-supplied fields violate the field rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No note has this id.
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// Persistence-layer failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type NoteResult<T> = Result<T, NoteError>;

/// Entry point for note operations. Cheap to clone; every clone shares the
/// same store handle.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    /// All notes, newest-created first.
    pub async fn list(&self) -> NoteResult<Vec<Note>> {
        let notes = self.store.list().await?;
        tracing::debug!(count = notes.len(), "Listed notes");
        Ok(notes)
    }

    pub async fn get(&self, id: &NoteId) -> NoteResult<Note> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| NoteError::NotFound(id.clone()))
    }

    pub async fn create(&self, input: NewNote) -> NoteResult<Note> {
        let valid = validate_new(input).inspect_err(|err| {
            tracing::warn!(error = %err, "Rejected note create");
        })?;
        let note = self.store.insert(valid).await?;
        tracing::debug!(id = %note.id, "Created note");
        Ok(note)
    }

    /// Apply a partial update. Field rules are re-checked for every supplied
    /// field; an empty patch returns the note unchanged.
    pub async fn update(&self, id: &NoteId, update: impl Into<NoteUpdate>) -> NoteResult<Note> {
        let patch = validate_patch(update.into()).inspect_err(|err| {
            tracing::warn!(id = %id, error = %err, "Rejected note update");
        })?;
        let note = self
            .store
            .update(id, patch)
            .await?
            .ok_or_else(|| NoteError::NotFound(id.clone()))?;
        tracing::debug!(id = %note.id, "Updated note");
        Ok(note)
    }

    pub async fn delete(&self, id: &NoteId) -> NoteResult<()> {
        if !self.store.delete(id).await? {
            return Err(NoteError::NotFound(id.clone()));
        }
        tracing::debug!(id = %id, "Deleted note");
        Ok(())
    }

    /// Readiness probe: succeeds when the store answers.
    pub async fn ready(&self) -> NoteResult<()> {
        self.store.ping().await?;
        Ok(())
    }
}
