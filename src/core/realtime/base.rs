//! Base types for the upstream realtime provider connection.
//!
//! The relay does not drive the provider's conversation itself; it only needs
//! to dial the provider with the right credentials and report why that failed.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use zeroize::Zeroizing;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while establishing or using the upstream connection.
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The provider rejected the credential
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Operation timeout
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// The peer is gone
    #[error("Not connected")]
    NotConnected,
}

/// Result type for realtime operations.
pub type RealtimeResult<T> = Result<T, RealtimeError>;

// =============================================================================
// Configuration Types
// =============================================================================

/// What the relay needs to dial the provider.
#[derive(Clone)]
pub struct RealtimeConfig {
    /// API key for authentication
    pub api_key: Zeroizing<String>,

    /// Full endpoint URL, including the model query parameter
    pub url: String,

    /// Upper bound on the connect + WebSocket handshake
    pub connect_timeout: Duration,
}

impl RealtimeConfig {
    pub fn new(api_key: impl Into<String>, url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
            url: url.into(),
            connect_timeout,
        }
    }
}

impl fmt::Debug for RealtimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealtimeConfig")
            .field("api_key", &"<redacted>")
            .field("url", &self.url)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
