//! Notes Server - HTTP JSON API for the note store service
//!
//! This crate exposes [`notes::NoteService`] over HTTP:
//!
//! - `GET /notes` - list notes, newest first
//! - `POST /notes` - create a note (201)
//! - `GET /notes/{id}` - fetch one note
//! - `PUT /notes/{id}` - update any subset of `title` / `content`
//! - `DELETE /notes/{id}` - delete a note (204)
//! - `GET /`, `GET /health`, `GET /ready` - info and probes
//!
//! Every error body is `{"error": "<message>"}`. Requests whose `Origin`
//! is not on the allow-list are refused with 403 before any route runs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
