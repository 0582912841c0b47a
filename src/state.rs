use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::realtime::RealtimeConfig;
use crate::errors::{AppError, AppResult};
use crate::relay::RelaySettings;

/// Process-wide, read-only state shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Arc::new(Self { config })
    }

    /// Settings for one relay session.
    ///
    /// Fails when no provider credential is configured, so the request can
    /// be refused before any socket work happens.
    pub fn relay_settings(&self) -> AppResult<RelaySettings> {
        let api_key = self.config.openai_api_key().ok_or_else(|| {
            AppError::ConfigurationError("OPENAI_API_KEY is not set".to_string())
        })?;

        Ok(RelaySettings {
            upstream: RealtimeConfig::new(
                api_key,
                self.config.openai_realtime_url.clone(),
                self.config.relay_connect_timeout(),
            ),
            write_buffer: self.config.relay_write_buffer,
        })
    }
}
