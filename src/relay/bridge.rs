//! The task that runs one voice session from upgrade to teardown.

use axum::extract::ws::WebSocket;
use futures::StreamExt;
use tokio::select;
use tracing::{Instrument, error, info};
use uuid::Uuid;

use super::RelaySettings;
use super::frame::Inbound;
use super::peer::Peer;
use super::session::{Flow, Session};
use crate::core::realtime::connect_upstream;

/// Bridge an upgraded client socket to the provider until either side closes.
pub async fn run_session(socket: WebSocket, settings: RelaySettings) {
    let id = Uuid::new_v4();
    let span = tracing::info_span!("voice_session", session_id = %id);
    drive(socket, settings).instrument(span).await
}

async fn drive(socket: WebSocket, settings: RelaySettings) {
    info!("Voice session started");

    let (client_sink, mut client_stream) = socket.split();
    let downstream = Peer::spawn("downstream", client_sink, settings.write_buffer);
    let mut session = Session::new(downstream);
    session.begin_connect();

    // Keep reading the client while dialing so a close cancels the connect
    let connect = connect_upstream(&settings.upstream);
    tokio::pin!(connect);

    let provider_socket = loop {
        select! {
            result = &mut connect => match result {
                Ok(socket) => break socket,
                Err(e) => {
                    error!(error = %e, "Failed to connect to OpenAI Realtime API");
                    session.close().await;
                    return;
                }
            },
            read = client_stream.next() => match Inbound::from_read(read, "downstream") {
                Inbound::Data(frame) => {
                    session.on_downstream_frame(frame);
                }
                Inbound::Control => {}
                Inbound::Closed => {
                    info!("Client closed before the provider connection opened");
                    session.close().await;
                    return;
                }
            },
        }
    };

    let (provider_sink, mut provider_stream) = provider_socket.split();
    session.attach_upstream(Peer::spawn("upstream", provider_sink, settings.write_buffer));

    loop {
        let flow = select! {
            read = client_stream.next() => match Inbound::from_read(read, "downstream") {
                Inbound::Data(frame) => session.on_downstream_frame(frame),
                Inbound::Control => Flow::Continue,
                Inbound::Closed => {
                    info!("Client disconnected");
                    Flow::Stop
                }
            },
            read = provider_stream.next() => match Inbound::from_read(read, "upstream") {
                Inbound::Data(frame) => session.on_upstream_frame(frame),
                Inbound::Control => Flow::Continue,
                Inbound::Closed => {
                    info!("OpenAI connection closed");
                    Flow::Stop
                }
            },
        };

        if flow == Flow::Stop {
            break;
        }
    }

    session.close().await;
    info!(state = %session.state(), "Voice session terminated");
}
