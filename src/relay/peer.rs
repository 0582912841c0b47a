//! Write half of one side of the bridge.
//!
//! Each peer owns a writer task fed by a bounded queue. Forwarding never
//! waits: a full queue means the peer is not writable right now and the
//! frame is dropped.

use std::fmt;
use std::time::Duration;

use futures::{Sink, SinkExt};
use tokio::sync::mpsc::{self, OwnedPermit, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, warn};

use super::frame::{Frame, WireMessage};

/// How long `close()` waits for queued frames and the close handshake.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// What happened to a frame handed to [`Peer::forward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    Sent,
    /// Queue full; the frame is gone
    Dropped,
    /// The writer has stopped; nothing more will reach this peer
    PeerClosed,
}

pub struct Peer {
    name: &'static str,
    tx: Option<mpsc::Sender<Frame>>,
    writer: Option<JoinHandle<()>>,
}

impl Peer {
    /// Start a writer task draining into `sink`.
    ///
    /// The sink is closed (which sends a WebSocket close frame) once every
    /// sender is gone or a write fails.
    pub fn spawn<S, M>(name: &'static str, mut sink: S, capacity: usize) -> Self
    where
        S: Sink<M> + Unpin + Send + 'static,
        S::Error: fmt::Display,
        M: WireMessage + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Frame>(capacity.max(1));

        let writer = tokio::spawn(
            async move {
                while let Some(frame) = rx.recv().await {
                    if let Err(e) = sink.send(M::from_frame(frame)).await {
                        warn!(peer = name, error = %e, "Failed to write frame");
                        break;
                    }
                }
                drop(rx);

                if let Err(e) = sink.close().await {
                    debug!(peer = name, error = %e, "Close on an already closed socket");
                }
            }
            .in_current_span(),
        );

        Self {
            name,
            tx: Some(tx),
            writer: Some(writer),
        }
    }

    /// Whether frames can still reach this peer.
    pub fn is_open(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Queue a frame without waiting.
    pub fn forward(&self, frame: Frame) -> ForwardOutcome {
        let Some(tx) = &self.tx else {
            return ForwardOutcome::PeerClosed;
        };

        match tx.try_send(frame) {
            Ok(()) => ForwardOutcome::Sent,
            Err(TrySendError::Full(frame)) => {
                debug!(
                    peer = self.name,
                    kind = frame.kind(),
                    bytes = frame.len(),
                    "Peer not writable, dropping frame"
                );
                ForwardOutcome::Dropped
            }
            Err(TrySendError::Closed(_)) => ForwardOutcome::PeerClosed,
        }
    }

    /// Hold one queue slot for a frame the relay will originate later.
    ///
    /// Sending through the permit never waits. The permit keeps the queue
    /// open, so it must be dropped before [`Peer::close`].
    pub fn reserve(&self) -> Option<OwnedPermit<Frame>> {
        self.tx.clone()?.try_reserve_owned().ok()
    }

    /// Stop accepting frames, let the writer flush and close the socket.
    ///
    /// Safe to call more than once.
    pub async fn close(&mut self) {
        // Dropping the only sender ends the writer loop after the queue drains
        if self.tx.take().is_none() {
            return;
        }

        if let Some(mut writer) = self.writer.take()
            && tokio::time::timeout(CLOSE_GRACE, &mut writer).await.is_err()
        {
            warn!(peer = self.name, "Writer did not finish in time, aborting");
            writer.abort();
        }
    }
}

impl fmt::Debug for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peer")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}
