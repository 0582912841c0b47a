//! WebSocket mock of the OpenAI Realtime API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::HeaderMap;
use tokio_tungstenite::{WebSocketStream, accept_hdr_async, tungstenite::Message};

use super::STEP_TIMEOUT;

/// A listening mock provider.
pub struct MockProvider {
    addr: SocketAddr,
    connections: mpsc::UnboundedReceiver<MockConnection>,
    connection_count: Arc<AtomicU64>,
}

impl MockProvider {
    pub async fn start() -> Self {
        Self::start_with_handshake_delay(Duration::ZERO).await
    }

    /// Accept TCP immediately but hold the WebSocket handshake for `delay`.
    pub async fn start_with_handshake_delay(delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, connections) = mpsc::unbounded_channel();
        let connection_count = Arc::new(AtomicU64::new(0));

        let count = connection_count.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                count.fetch_add(1, Ordering::SeqCst);
                let tx = tx.clone();
                tokio::spawn(async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    if let Ok(connection) = handshake(stream).await {
                        let _ = tx.send(connection);
                    }
                });
            }
        });

        Self {
            addr,
            connections,
            connection_count,
        }
    }

    /// Endpoint in the same shape as the real one.
    pub fn url(&self) -> String {
        format!(
            "ws://{}/v1/realtime?model=gpt-4o-realtime-preview-2024-10-01",
            self.addr
        )
    }

    /// TCP connections accepted so far.
    pub fn connection_count(&self) -> u64 {
        self.connection_count.load(Ordering::SeqCst)
    }

    /// Wait for the relay to complete a handshake.
    pub async fn accept(&mut self) -> MockConnection {
        tokio::time::timeout(STEP_TIMEOUT, self.connections.recv())
            .await
            .expect("timed out waiting for the relay to connect")
            .expect("mock provider stopped")
    }
}

async fn handshake(
    stream: TcpStream,
) -> Result<MockConnection, tokio_tungstenite::tungstenite::Error> {
    let mut headers = HeaderMap::new();
    let ws = accept_hdr_async(
        stream,
        |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            headers = request.headers().clone();
            Ok(response)
        },
    )
    .await?;

    Ok(MockConnection { headers, ws })
}

/// The provider side of one relayed session.
pub struct MockConnection {
    /// Headers of the relay's handshake request
    pub headers: HeaderMap,
    ws: WebSocketStream<TcpStream>,
}

impl MockConnection {
    pub async fn send_text(&mut self, text: &str) {
        self.ws.send(Message::Text(text.into())).await.unwrap();
    }

    pub async fn send_binary(&mut self, data: &'static [u8]) {
        self.ws
            .send(Message::Binary(bytes::Bytes::from_static(data)))
            .await
            .unwrap();
    }

    /// Next data frame from the relay, or `None` once it closed.
    pub async fn recv(&mut self) -> Option<Message> {
        tokio::time::timeout(STEP_TIMEOUT, self.next_data())
            .await
            .expect("timed out waiting for a frame from the relay")
    }

    /// Next text frame from the relay, parsed as JSON.
    pub async fn recv_json(&mut self) -> serde_json::Value {
        match self.recv().await {
            Some(Message::Text(text)) => serde_json::from_str(text.as_str()).unwrap(),
            other => panic!("expected a text frame, got {other:?}"),
        }
    }

    /// Assert the relay sends nothing for `window`.
    pub async fn expect_silence(&mut self, window: Duration) {
        if let Ok(message) = tokio::time::timeout(window, self.next_data()).await {
            panic!("expected no frame, got {message:?}");
        }
    }

    /// Wait for the relay to close the connection.
    pub async fn expect_closed(&mut self) {
        if let Some(message) = self.recv().await {
            panic!("expected close, got {message:?}");
        }
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
        // Drain until the relay acknowledges
        let _ = tokio::time::timeout(STEP_TIMEOUT, async {
            while let Some(Ok(_)) = self.ws.next().await {}
        })
        .await;
    }

    async fn next_data(&mut self) -> Option<Message> {
        loop {
            match self.ws.next().await {
                Some(Ok(message @ (Message::Text(_) | Message::Binary(_)))) => {
                    return Some(message);
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return None,
                Some(Ok(_)) => continue,
            }
        }
    }
}
