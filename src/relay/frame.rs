//! Data frames as the relay sees them, independent of which WebSocket
//! implementation carried them.
//!
//! The downstream socket is axum's, the upstream one is tokio-tungstenite's.
//! Both are reduced to [`Inbound`] on read and rebuilt from a [`Frame`] on
//! write, so payloads cross the bridge without being inspected or re-encoded.

use std::fmt;

use axum::extract::ws::Message as DownstreamMessage;
use bytes::Bytes;
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;
use tracing::warn;

/// One WebSocket data message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Bytes),
}

impl Frame {
    /// Raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Frame::Text(text) => text.as_bytes(),
            Frame::Binary(data) => data.as_ref(),
        }
    }

    /// Payload size, for logs.
    pub(crate) fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::Text(_) => "text",
            Frame::Binary(_) => "binary",
        }
    }
}

/// Result of one read from a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A data frame to relay
    Data(Frame),
    /// Ping/pong, answered by the transport and never relayed
    Control,
    /// The peer closed, errored, or its stream ended
    Closed,
}

impl Inbound {
    /// Classify what a `StreamExt::next()` on a peer returned.
    pub fn from_read<M, E>(read: Option<Result<M, E>>, peer: &'static str) -> Self
    where
        M: WireMessage,
        E: fmt::Display,
    {
        match read {
            Some(Ok(message)) => message.into_inbound(),
            Some(Err(e)) => {
                warn!(peer, error = %e, "WebSocket read error");
                Inbound::Closed
            }
            None => Inbound::Closed,
        }
    }
}

/// A WebSocket message type the relay can read from and write to.
pub trait WireMessage: Sized {
    fn from_frame(frame: Frame) -> Self;

    fn into_inbound(self) -> Inbound;
}

impl WireMessage for DownstreamMessage {
    fn from_frame(frame: Frame) -> Self {
        match frame {
            Frame::Text(text) => DownstreamMessage::Text(text.into()),
            Frame::Binary(data) => DownstreamMessage::Binary(data),
        }
    }

    fn into_inbound(self) -> Inbound {
        match self {
            DownstreamMessage::Text(text) => Inbound::Data(Frame::Text(text.as_str().to_owned())),
            DownstreamMessage::Binary(data) => Inbound::Data(Frame::Binary(data)),
            DownstreamMessage::Ping(_) | DownstreamMessage::Pong(_) => Inbound::Control,
            DownstreamMessage::Close(_) => Inbound::Closed,
        }
    }
}

impl WireMessage for UpstreamMessage {
    fn from_frame(frame: Frame) -> Self {
        match frame {
            Frame::Text(text) => UpstreamMessage::Text(text.into()),
            Frame::Binary(data) => UpstreamMessage::Binary(data),
        }
    }

    fn into_inbound(self) -> Inbound {
        match self {
            UpstreamMessage::Text(text) => Inbound::Data(Frame::Text(text.as_str().to_owned())),
            UpstreamMessage::Binary(data) => Inbound::Data(Frame::Binary(data)),
            UpstreamMessage::Ping(_) | UpstreamMessage::Pong(_) | UpstreamMessage::Frame(_) => {
                Inbound::Control
            }
            UpstreamMessage::Close(_) => Inbound::Closed,
        }
    }
}
