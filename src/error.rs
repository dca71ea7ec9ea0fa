//! Domain-specific error types for the digital twin service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the digital twin HTTP service
#[derive(Error, Debug)]
pub enum DigitalTwinError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Malformed request body; carries the status the extractor chose (400/415/422)
    #[error("Bad request: {message}")]
    BadRequest { status: StatusCode, message: String },
}

impl DigitalTwinError {
    pub fn status(&self) -> StatusCode {
        match self {
            DigitalTwinError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DigitalTwinError::BadRequest { status, .. } => *status,
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for DigitalTwinError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        DigitalTwinError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Convert DigitalTwinError to an HTTP response with a JSON error body
impl IntoResponse for DigitalTwinError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::debug!("request rejected ({}): {}", status.as_u16(), self);
        }
        let body = json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

/// Result type alias for digital twin operations
pub type Result<T> = std::result::Result<T, DigitalTwinError>;
