//! Upstream connection to the OpenAI Realtime API.
//!
//! # API Reference
//!
//! - Endpoint: `wss://api.openai.com/v1/realtime?model=<model>`
//! - Protocol: WebSocket with JSON events
//! - Auth: `Authorization: Bearer <key>` plus `OpenAI-Beta: realtime=v1`
//!
//! The relay opens exactly one connection per session and never reconnects.

use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{
    self,
    client::IntoClientRequest,
    handshake::client::Request,
    http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION},
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::config::{OPENAI_BETA_HEADER, OPENAI_BETA_REALTIME};
use crate::core::realtime::base::{RealtimeConfig, RealtimeError, RealtimeResult};
use crate::utils::url_validation::redact_query;

/// The provider-facing WebSocket.
pub type UpstreamSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Build the authenticated handshake request for the provider.
pub fn build_upstream_request(config: &RealtimeConfig) -> RealtimeResult<Request> {
    if config.api_key.trim().is_empty() {
        return Err(RealtimeError::AuthenticationFailed(
            "API key is required".to_string(),
        ));
    }

    let mut request = config
        .url
        .as_str()
        .into_client_request()
        .map_err(|e| RealtimeError::InvalidConfiguration(e.to_string()))?;

    let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key.as_str()))
        .map_err(|_| {
            RealtimeError::InvalidConfiguration(
                "API key contains characters not allowed in a header".to_string(),
            )
        })?;

    let headers = request.headers_mut();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(
        HeaderName::from_static(OPENAI_BETA_HEADER),
        HeaderValue::from_static(OPENAI_BETA_REALTIME),
    );

    Ok(request)
}

/// Open the provider connection.
///
/// Fails with [`RealtimeError::Timeout`] when the TCP connect, TLS and
/// WebSocket handshake together exceed the configured timeout.
pub async fn connect_upstream(config: &RealtimeConfig) -> RealtimeResult<UpstreamSocket> {
    let request = build_upstream_request(config)?;
    let target = url::Url::parse(&config.url)
        .map(|u| redact_query(&u))
        .unwrap_or_else(|_| config.url.clone());

    tracing::debug!(url = %target, "Connecting to OpenAI Realtime API");

    let (ws_stream, response) = tokio::time::timeout(
        config.connect_timeout,
        tokio_tungstenite::connect_async(request),
    )
    .await
    .map_err(|_| {
        RealtimeError::Timeout(format!(
            "no handshake from {} within {}s",
            target,
            config.connect_timeout.as_secs()
        ))
    })?
    .map_err(classify_connect_error)?;

    tracing::info!(status = %response.status(), "Connected to OpenAI Realtime API");

    Ok(ws_stream)
}

fn classify_connect_error(err: tungstenite::Error) -> RealtimeError {
    match err {
        tungstenite::Error::Http(response)
            if matches!(
                response.status(),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
            ) =>
        {
            RealtimeError::AuthenticationFailed(format!(
                "provider rejected credentials with {}",
                response.status()
            ))
        }
        tungstenite::Error::Http(response) => RealtimeError::ConnectionFailed(format!(
            "provider rejected handshake with {}",
            response.status()
        )),
        other => RealtimeError::ConnectionFailed(other.to_string()),
    }
}
