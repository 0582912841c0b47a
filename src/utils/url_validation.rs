//! URL validation for the upstream realtime endpoint
//!
//! The relay only ever dials one configured endpoint. This module makes sure
//! that endpoint is a WebSocket URL with a host before the server starts, so
//! a typo fails at startup instead of on every session.

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be ws or wss, got: {0}")]
    WebSocketSchemeRequired(String),

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates the upstream realtime endpoint URL.
///
/// Accepts `wss://` and `ws://` URLs with a host. Plain `ws://` is allowed for
/// local mock providers but logged, since the provider credential would travel
/// unencrypted.
pub fn validate_upstream_url(raw: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(raw)?;

    match url.scheme() {
        "wss" => {}
        "ws" => {
            warn!(
                url = %redact_query(&url),
                "Upstream realtime URL uses plain ws://, credentials will not be encrypted"
            );
        }
        other => return Err(UrlValidationError::WebSocketSchemeRequired(other.to_string())),
    }

    if url.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// Renders a URL without its query string, for logging.
pub fn redact_query(url: &Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.to_string()
}
