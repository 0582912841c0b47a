//! HTTP-facing errors for the relay endpoints.
//!
//! Admission failures are the only errors a client ever sees as an HTTP
//! response. Everything that happens after the upgrade is logged and ends
//! the session instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Body returned for requests that are not WebSocket upgrades.
pub const EXPECTED_WEBSOCKET_BODY: &str = "Expected WebSocket connection";

/// Body returned when the server is missing required provider configuration.
pub const SERVER_CONFIGURATION_BODY: &str = "Server configuration error";

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request cannot be turned into a relay session.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The server cannot serve relay sessions with its current configuration.
    /// The detail is logged but never sent to the client.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AppError {
    /// The rejection used for anything that is not a usable WebSocket upgrade.
    pub fn expected_websocket() -> Self {
        Self::BadRequest(EXPECTED_WEBSOCKET_BODY.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::BadRequest(message) => (status, message).into_response(),
            Self::ConfigurationError(detail) => {
                error!("{}", detail);
                (status, SERVER_CONFIGURATION_BODY).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
