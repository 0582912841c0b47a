//! Realtime voice WebSocket handler
//!
//! Admission for the voice relay: answers CORS preflight, rejects anything
//! that is not a WebSocket upgrade, refuses service when the provider
//! credential is missing, and otherwise hands the upgraded socket to the
//! relay.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::{
        HeaderMap, HeaderValue, Method, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, UPGRADE},
    },
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::relay::run_session;
use crate::state::AppState;

/// Maximum WebSocket frame size (10 MB)
const MAX_WS_FRAME_SIZE: usize = 10 * 1024 * 1024;

/// Maximum WebSocket message size (10 MB)
const MAX_WS_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// Origins allowed by the preflight response.
pub const CORS_ALLOW_ORIGIN: &str = "*";

/// Request headers allowed by the preflight response.
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Realtime voice handler
///
/// # Responses
/// * `204` - CORS preflight (`OPTIONS`)
/// * `400 Expected WebSocket connection` - not a WebSocket upgrade
/// * `500 Server configuration error` - `OPENAI_API_KEY` is not configured
/// * `101` - upgraded; the session runs on its own task
pub async fn realtime_voice_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> AppResult<Response> {
    if method == Method::OPTIONS {
        return Ok(preflight_response());
    }

    if !is_websocket_upgrade(&headers) {
        debug!(%method, "Rejecting request without WebSocket upgrade");
        return Err(AppError::expected_websocket());
    }

    let settings = state.relay_settings()?;

    let ws = ws.map_err(|rejection| {
        warn!(error = %rejection, "Invalid WebSocket handshake");
        AppError::expected_websocket()
    })?;

    info!("Realtime voice WebSocket upgrade requested");

    Ok(ws
        .max_frame_size(MAX_WS_FRAME_SIZE)
        .max_message_size(MAX_WS_MESSAGE_SIZE)
        .on_upgrade(move |socket| run_session(socket, settings)))
}

fn preflight_response() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(CORS_ALLOW_ORIGIN),
            ),
            (
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(CORS_ALLOW_HEADERS),
            ),
        ],
    )
        .into_response()
}

/// `Upgrade: websocket`, compared case-insensitively.
fn is_websocket_upgrade(headers: &HeaderMap) -> bool {
    headers
        .get(UPGRADE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("websocket"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_upgrade(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(UPGRADE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_upgrade_header_is_case_insensitive() {
        assert!(is_websocket_upgrade(&with_upgrade("websocket")));
        assert!(is_websocket_upgrade(&with_upgrade("WebSocket")));
        assert!(is_websocket_upgrade(&with_upgrade("WEBSOCKET")));
    }

    #[test]
    fn test_other_upgrades_are_rejected() {
        assert!(!is_websocket_upgrade(&HeaderMap::new()));
        assert!(!is_websocket_upgrade(&with_upgrade("h2c")));
        assert!(!is_websocket_upgrade(&with_upgrade("")));
    }

    #[test]
    fn test_preflight_headers() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_HEADERS],
            "authorization, x-client-info, apikey, content-type"
        );
    }
}
