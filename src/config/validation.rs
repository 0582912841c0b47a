use super::{ConfigError, ServerConfig};
use crate::utils::validate_upstream_url;

/// Validate a fully merged configuration.
pub(super) fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    validate_upstream_url(&config.openai_realtime_url)?;

    if config.relay_write_buffer == 0 {
        return Err(ConfigError::InvalidValue {
            name: "RELAY_WRITE_BUFFER",
            value: config.relay_write_buffer.to_string(),
        });
    }

    if config.relay_connect_timeout_seconds == 0 {
        return Err(ConfigError::InvalidValue {
            name: "RELAY_CONNECT_TIMEOUT_SECONDS",
            value: config.relay_connect_timeout_seconds.to_string(),
        });
    }

    if config.openai_api_key().is_none() {
        tracing::warn!(
            "OPENAI_API_KEY is not set; realtime voice sessions will be rejected with a server configuration error"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ServerConfig::default();
        config.relay_connect_timeout_seconds = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidValue {
                name: "RELAY_CONNECT_TIMEOUT_SECONDS",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_upstream_url_rejected() {
        let mut config = ServerConfig::default();
        config.openai_realtime_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUpstreamUrl(_))
        ));
    }
}
