// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed query parameters.
    #[error("{0}")]
    InvalidQuery(String),

    /// The handler's work was dropped because the client went away.
    #[error("client disconnected before the result was ready")]
    Disconnected,

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Disconnected => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Why a demo request ended without a body.
///
/// The `Display` text is what lands after `ERROR:` in the results area.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("canceled")]
    Cancelled,

    #[error("Request failed with status code {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_messages() {
        assert_eq!(RequestError::Cancelled.to_string(), "canceled");
        assert_eq!(
            RequestError::Status(503).to_string(),
            "Request failed with status code 503"
        );
    }

    #[test]
    fn app_error_status_codes() {
        let resp = AppError::Disconnected.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let resp = AppError::InvalidQuery("nope".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
