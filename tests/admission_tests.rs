//! Admission behaviour of the `/realtime-voice` endpoint, exercised through
//! the router without a network listener.

mod mock_providers;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use tower::ServiceExt;

use janmitra_relay::{ServerConfig, routes, state::AppState};
use mock_providers::{MockProvider, relay_config};

fn app(config: ServerConfig) -> Router {
    routes::create_router(AppState::new(config))
}

fn upgrade_request(upgrade: &str) -> Request<Body> {
    Request::builder()
        .uri("/realtime-voice")
        .header("connection", "upgrade")
        .header("upgrade", upgrade)
        .header("sec-websocket-version", "13")
        .header("sec-websocket-key", "dGhlIHNhbXBsZSBub25jZQ==")
        .body(Body::empty())
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_plain_get_is_rejected() {
    let request = Request::builder()
        .uri("/realtime-voice")
        .body(Body::empty())
        .unwrap();
    let response = app(relay_config("ws://127.0.0.1:9/v1/realtime"))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "Expected WebSocket connection");
}

#[tokio::test]
async fn test_post_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/realtime-voice")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"hello":"world"}"#))
        .unwrap();
    let response = app(relay_config("ws://127.0.0.1:9/v1/realtime"))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "Expected WebSocket connection");
}

#[tokio::test]
async fn test_non_websocket_upgrade_is_rejected() {
    let response = app(relay_config("ws://127.0.0.1:9/v1/realtime"))
        .oneshot(upgrade_request("h2c"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "Expected WebSocket connection");
}

#[tokio::test]
async fn test_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/realtime-voice")
        .header("origin", "https://janmitra.example")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();
    let response = app(ServerConfig::default()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "authorization, x-client-info, apikey, content-type"
    );
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn test_missing_api_key_is_server_error_without_dialing() {
    let provider = MockProvider::start().await;
    let mut config = relay_config(&provider.url());
    config.openai_api_key = None;

    let response = app(config)
        .oneshot(upgrade_request("WebSocket"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Server configuration error");
    assert_eq!(provider.connection_count(), 0);
}

#[tokio::test]
async fn test_blank_api_key_is_server_error() {
    let mut config = relay_config("ws://127.0.0.1:9/v1/realtime");
    config.openai_api_key = Some("  ".to_string());

    let response = app(config)
        .oneshot(upgrade_request("websocket"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_incomplete_handshake_is_rejected() {
    let request = Request::builder()
        .uri("/realtime-voice")
        .header("upgrade", "websocket")
        .body(Body::empty())
        .unwrap();
    let response = app(relay_config("ws://127.0.0.1:9/v1/realtime"))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "Expected WebSocket connection");
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app(ServerConfig::default()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, serde_json::json!({ "status": "OK" }));
}
