//! Mock OpenAI Realtime provider and relay harness for integration tests.
//!
//! The mock accepts real WebSocket connections and hands each one to the
//! test, which then plays the provider's side of the conversation by hand.

// Not every test binary uses every helper
#![allow(dead_code)]

pub mod websocket_mock;

pub use websocket_mock::{MockConnection, MockProvider};

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use janmitra_relay::{ServerConfig, routes, state::AppState};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// Upper bound for any single wait in these tests.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(5);

pub type ClientSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Relay configuration pointed at `upstream_url`.
pub fn relay_config(upstream_url: &str) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.openai_api_key = Some("sk-test-key".to_string());
    config.openai_realtime_url = upstream_url.to_string();
    config.relay_connect_timeout_seconds = 2;
    config
}

/// Serve the full router on an ephemeral port.
pub async fn spawn_relay(config: ServerConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = routes::create_router(AppState::new(config));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Open a client WebSocket to the relay.
pub async fn connect_client(relay: SocketAddr) -> ClientSocket {
    let (socket, response) = tokio::time::timeout(
        STEP_TIMEOUT,
        connect_async(format!("ws://{relay}/realtime-voice")),
    )
    .await
    .expect("client connect timed out")
    .expect("client connect failed");
    assert_eq!(response.status(), 101);
    socket
}

/// Next data frame the client receives, or `None` once the relay closed.
pub async fn client_recv(client: &mut ClientSocket) -> Option<Message> {
    tokio::time::timeout(STEP_TIMEOUT, async {
        loop {
            match client.next().await {
                Some(Ok(message @ (Message::Text(_) | Message::Binary(_)))) => {
                    return Some(message);
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return None,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await
    .expect("timed out waiting for the relay")
}

pub async fn client_send_text(client: &mut ClientSocket, text: &str) {
    client.send(Message::Text(text.into())).await.unwrap();
}
