use std::path::PathBuf;

use super::yaml::YamlConfig;
use super::{ConfigError, ServerConfig, TlsConfig, env};

/// Merge environment configuration with optional YAML overrides.
///
/// Environment variables (and defaults) form the base; any value present in
/// the YAML document replaces the environment value.
pub(super) fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, ConfigError> {
    let mut config = env::load_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(tls) = server.tls {
            config.tls = match tls.enabled {
                Some(false) => None,
                Some(true) => {
                    let cert_path = tls
                        .cert_path
                        .or_else(|| config.tls.as_ref().map(|t| t.cert_path.display().to_string()))
                        .ok_or_else(|| {
                            ConfigError::Invalid(
                                "server.tls.enabled is true but cert_path is missing".to_string(),
                            )
                        })?;
                    let key_path = tls
                        .key_path
                        .or_else(|| config.tls.as_ref().map(|t| t.key_path.display().to_string()))
                        .ok_or_else(|| {
                            ConfigError::Invalid(
                                "server.tls.enabled is true but key_path is missing".to_string(),
                            )
                        })?;
                    Some(TlsConfig {
                        cert_path: PathBuf::from(cert_path),
                        key_path: PathBuf::from(key_path),
                    })
                }
                None => config.tls.take(),
            };
        }
    }

    if let Some(providers) = yaml.providers
        && let Some(key) = providers.openai_api_key
    {
        config.openai_api_key = Some(key);
    }

    if let Some(relay) = yaml.relay {
        if let Some(url) = relay.upstream_url {
            config.openai_realtime_url = url;
        }
        if let Some(timeout) = relay.connect_timeout_seconds {
            config.relay_connect_timeout_seconds = timeout;
        }
        if let Some(buffer) = relay.write_buffer {
            config.relay_write_buffer = buffer;
        }
    }

    Ok(config)
}
