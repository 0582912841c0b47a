//! Realtime voice route configuration

use axum::{Router, routing::any};
use tower_http::trace::TraceLayer;

use crate::handlers::realtime::realtime_voice_handler;
use crate::state::AppState;
use std::sync::Arc;

/// Path of the voice relay endpoint.
pub const REALTIME_VOICE_PATH: &str = "/realtime-voice";

/// Create the realtime voice router
///
/// # Endpoint
///
/// `/realtime-voice` - WebSocket upgrade into a relayed OpenAI Realtime
/// session. Any method is routed so that preflight and plain HTTP requests
/// get the relay's own responses instead of 405.
pub fn create_realtime_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(REALTIME_VOICE_PATH, any(realtime_voice_handler))
        .layer(TraceLayer::new_for_http())
}
