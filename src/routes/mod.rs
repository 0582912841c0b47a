pub mod realtime;

use std::sync::Arc;

use axum::{Router, routing::get};
use http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers::api::health_check;
use crate::state::AppState;

/// Assemble the full application: health check, voice relay and security
/// headers.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new().route("/", get(health_check));

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    public_routes
        .merge(realtime::create_realtime_router())
        .with_state(state)
        .layer(security_headers)
}
