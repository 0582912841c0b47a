use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::{
    ConfigError, DEFAULT_CONNECT_TIMEOUT_SECONDS, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_WRITE_BUFFER,
    ServerConfig, TlsConfig,
};
use crate::core::realtime::DEFAULT_UPSTREAM_URL;

/// Read an environment variable, treating empty values as unset.
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        None => Ok(default),
    }
}

fn parse_bool(name: &'static str) -> Result<bool, ConfigError> {
    match var(name) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { name, value: raw }),
        },
        None => Ok(false),
    }
}

/// Load TLS settings from `TLS_ENABLED`, `TLS_CERT_PATH` and `TLS_KEY_PATH`.
pub(super) fn load_tls() -> Result<Option<TlsConfig>, ConfigError> {
    if !parse_bool("TLS_ENABLED")? {
        return Ok(None);
    }

    let cert_path = var("TLS_CERT_PATH").ok_or_else(|| {
        ConfigError::Invalid("TLS_ENABLED is set but TLS_CERT_PATH is missing".to_string())
    })?;
    let key_path = var("TLS_KEY_PATH").ok_or_else(|| {
        ConfigError::Invalid("TLS_ENABLED is set but TLS_KEY_PATH is missing".to_string())
    })?;

    Ok(Some(TlsConfig {
        cert_path: PathBuf::from(cert_path),
        key_path: PathBuf::from(key_path),
    }))
}

/// Build a configuration from environment variables and defaults.
pub(super) fn load_env() -> Result<ServerConfig, ConfigError> {
    Ok(ServerConfig {
        host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: parse_var("PORT", DEFAULT_PORT)?,
        tls: load_tls()?,
        openai_api_key: var("OPENAI_API_KEY"),
        openai_realtime_url: var("OPENAI_REALTIME_URL")
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
        relay_connect_timeout_seconds: parse_var(
            "RELAY_CONNECT_TIMEOUT_SECONDS",
            DEFAULT_CONNECT_TIMEOUT_SECONDS,
        )?,
        relay_write_buffer: parse_var("RELAY_WRITE_BUFFER", DEFAULT_WRITE_BUFFER)?,
    })
}
