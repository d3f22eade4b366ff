//! Note store service: the domain half of the notes backend.
//!
//! This crate owns the single resource type, its field rules, and the
//! persistence seam. The HTTP surface lives in `crates/server`.
//!
//! - [`model`]: `Note`, `NoteId` and the create/update inputs.
//! - [`validate`]: trimming and required-field checks applied before every write.
//! - [`store`]: the `NoteStore` trait with in-memory and MongoDB backends.
//! - [`service`]: `NoteService`, which ties validation to the store and
//!   reports failures as validation, not-found or store faults.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use notes::{InMemoryStore, NewNote, NoteService};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), notes::NoteError> {
//! let service = NoteService::new(Arc::new(InMemoryStore::new()));
//! let note = service
//!     .create(NewNote::new("Groceries", "Milk, eggs"))
//!     .await?;
//! assert_eq!(note.title, "Groceries");
//! assert_eq!(service.list().await?.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod model;
pub mod service;
pub mod store;
pub mod validate;

pub use model::{NewNote, Note, NoteId, NotePatch, NoteUpdate};
pub use service::{NoteError, NoteResult, NoteService};
pub use store::{InMemoryStore, NoteStore, StoreConfig, StoreError};
pub use validate::{ValidNote, ValidationError, validate_new, validate_patch};

#[cfg(feature = "mongodb")]
pub use store::MongoStore;
