//! Persistence seam for notes.
//!
//! The service talks to storage only through [`NoteStore`], so the backing
//! engine can be swapped (MongoDB in production, [`InMemoryStore`] in tests)
//! without touching validation or the HTTP layer.

use crate::model::{Note, NoteId, NotePatch};
use crate::validate::ValidNote;
use async_trait::async_trait;
use std::sync::Arc;

mod memory;
#[cfg(feature = "mongodb")]
mod mongo;

pub use memory::InMemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;

/// Faults raised by a store backend. "Not found" is not a fault; stores
/// report it through `Option`/`bool` return values.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations for the note collection.
///
/// Implementations own identifier assignment. Writes arrive already
/// validated; a store never needs to re-check field rules.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, newest-created first. Backends shared by several
    /// processes may only order to their id's time resolution.
    async fn list(&self) -> StoreResult<Vec<Note>>;

    /// Persist a new note and return it with its assigned id.
    async fn insert(&self, note: ValidNote) -> StoreResult<Note>;

    async fn get(&self, id: &NoteId) -> StoreResult<Option<Note>>;

    /// Apply the supplied fields. Returns the full updated note, or `None`
    /// when no note has this id.
    async fn update(&self, id: &NoteId, patch: NotePatch) -> StoreResult<Option<Note>>;

    /// Hard delete. Returns `false` when no note has this id.
    async fn delete(&self, id: &NoteId) -> StoreResult<bool>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Selects and builds a store backend.
///
/// # Example
/// ```
/// use notes::StoreConfig;
///
/// // In-memory (for testing)
/// let config = StoreConfig::in_memory();
///
/// // MongoDB
/// let config = StoreConfig::mongodb("mongodb://localhost:27017/notesdb");
/// ```
#[derive(Clone, Debug, Default)]
pub enum StoreConfig {
    /// MongoDB reached through a connection string. The database is taken
    /// from the URI path, falling back to `notesdb`.
    ///
    /// Requires the `mongodb` feature (enabled by default).
    MongoDb { uri: String, collection: String },
    /// Process-local map; contents are lost on restart.
    #[default]
    InMemory,
}

pub const DEFAULT_DATABASE: &str = "notesdb";
pub const DEFAULT_COLLECTION: &str = "notes";

impl StoreConfig {
    pub fn in_memory() -> Self {
        StoreConfig::InMemory
    }

    pub fn mongodb<S: Into<String>>(uri: S) -> Self {
        StoreConfig::MongoDb {
            uri: uri.into(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Connect to the configured backend.
    pub async fn build(&self) -> StoreResult<Arc<dyn NoteStore>> {
        match self {
            StoreConfig::InMemory => Ok(Arc::new(InMemoryStore::new())),
            StoreConfig::MongoDb { uri, collection } => {
                #[cfg(feature = "mongodb")]
                {
                    Ok(Arc::new(MongoStore::connect(uri, collection).await?))
                }
                #[cfg(not(feature = "mongodb"))]
                {
                    let _ = (uri, collection);
                    Err(StoreError::backend(
                        "mongodb backend disabled at compile time",
                    ))
                }
            }
        }
    }
}
