//! API route handlers
//!
//! - `notes`: the note resource (list, get, create, update, delete)
//! - `health`: liveness and readiness probes

pub mod health;
pub mod notes;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// ```json
/// {
///   "name": "notes-server",
///   "version": "0.1.0",
///   "uptime_seconds": 12,
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "notes-server",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": health::uptime_seconds(),
        "endpoints": [
            "GET /notes",
            "POST /notes",
            "GET /notes/{id}",
            "PUT /notes/{id}",
            "DELETE /notes/{id}",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// 405 handler for known paths hit with an unrouted method
pub async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}
