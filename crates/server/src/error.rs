use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notes::NoteError;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Field rules rejected the request. The message is sent as-is.
    #[error("{0}")]
    Validation(String),

    /// The body could not be parsed.
    #[error("{0}")]
    BadRequest(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Request timeout")]
    Timeout,

    #[error("CORS policy: This origin is not allowed.")]
    OriginDenied,

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Service unavailable")]
    Unavailable(String),

    /// Any other fault. The cause is logged, never sent.
    #[error("Internal server error")]
    Internal(String),
}

/// API error response structure: `{"error": "<message>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::OriginDenied => StatusCode::FORBIDDEN,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ServerError::Internal(cause) => {
                tracing::error!(cause = %cause, "Request failed with internal error");
            }
            ServerError::Unavailable(cause) => {
                tracing::warn!(cause = %cause, "Store unavailable");
            }
            ServerError::Timeout => {
                tracing::warn!("Request timed out");
            }
            _ => {}
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<NoteError> for ServerError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::Validation(err) => ServerError::Validation(err.to_string()),
            NoteError::NotFound(_) => ServerError::NotFound,
            NoteError::Store(err) => ServerError::Internal(err.to_string()),
        }
    }
}

/// Body rejections are 400 with axum's text, except an over-limit body,
/// which keeps its 413.
impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    }
}
