//! Per-connection session state.
//!
//! ```text
//! Admitted -> UpstreamConnecting -> Configuring -> Relaying
//!     \              \                   \            \
//!      +--------------+-------------------+------------+--> Closed
//! ```
//!
//! The `session.update` event is emitted only by the
//! `Configuring -> Relaying` transition, so it is sent at most once. Its
//! queue slot is reserved when the provider attaches, so sending it never
//! waits on a stalled provider.

use std::fmt;

use tokio::sync::mpsc::OwnedPermit;
use tracing::{debug, error, info, warn};

use super::frame::Frame;
use super::peer::{ForwardOutcome, Peer};
use crate::core::realtime::{
    RealtimeError, RealtimeResult, ServerEventEnvelope, janmitra_session_update,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Admitted,
    UpstreamConnecting,
    Configuring,
    Relaying,
    Closed,
}

impl SessionState {
    /// The state an upstream event moves to, if it moves at all.
    ///
    /// Only `session.created` while configuring does; that transition is
    /// the one that sends the configuration.
    pub fn after_upstream_event(&self, event: &ServerEventEnvelope) -> Option<SessionState> {
        (*self == SessionState::Configuring && event.is_session_created())
            .then_some(SessionState::Relaying)
    }

    pub fn is_closed(&self) -> bool {
        *self == SessionState::Closed
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Admitted => "admitted",
            SessionState::UpstreamConnecting => "upstream_connecting",
            SessionState::Configuring => "configuring",
            SessionState::Relaying => "relaying",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Whether the bridge loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// One downstream client paired with at most one upstream connection.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    downstream: Peer,
    upstream: Option<Peer>,
    /// Upstream queue slot held for `session.update`
    config_slot: Option<OwnedPermit<Frame>>,
}

impl Session {
    pub fn new(downstream: Peer) -> Self {
        Self {
            state: SessionState::Admitted,
            downstream,
            upstream: None,
            config_slot: None,
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "Session state change");
        self.state = next;
    }

    pub fn begin_connect(&mut self) {
        if self.state == SessionState::Admitted {
            self.transition(SessionState::UpstreamConnecting);
        }
    }

    /// Hand the connected provider socket's writer to the session.
    pub fn attach_upstream(&mut self, upstream: Peer) {
        if self.state != SessionState::UpstreamConnecting {
            warn!(state = %self.state, "Upstream attached outside of connecting state");
        }
        self.config_slot = upstream.reserve();
        self.upstream = Some(upstream);
        if !self.state.is_closed() {
            self.transition(SessionState::Configuring);
        }
    }

    /// Relay a client frame to the provider, or drop it.
    pub fn on_downstream_frame(&mut self, frame: Frame) -> Flow {
        let Some(upstream) = &self.upstream else {
            debug!(
                kind = frame.kind(),
                bytes = frame.len(),
                "Upstream not connected yet, dropping client frame"
            );
            return Flow::Continue;
        };

        match upstream.forward(frame) {
            ForwardOutcome::Sent | ForwardOutcome::Dropped => Flow::Continue,
            ForwardOutcome::PeerClosed => {
                info!("Upstream writer stopped");
                Flow::Stop
            }
        }
    }

    /// Handle one provider event: configure on the first `session.created`,
    /// then relay the event to the client unchanged.
    pub fn on_upstream_frame(&mut self, frame: Frame) -> Flow {
        let envelope = match ServerEventEnvelope::parse(frame.as_bytes()) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(
                    kind = frame.kind(),
                    bytes = frame.len(),
                    error = %e,
                    "Dropping malformed upstream event"
                );
                return Flow::Continue;
            }
        };

        if let Some(next) = self.state.after_upstream_event(&envelope) {
            self.transition(next);
            if let Err(e) = self.send_configuration() {
                error!(error = %e, "Failed to send session configuration");
                return Flow::Stop;
            }
            info!("Session configuration sent to OpenAI");
        }

        match self.downstream.forward(frame) {
            ForwardOutcome::Sent | ForwardOutcome::Dropped => Flow::Continue,
            ForwardOutcome::PeerClosed => {
                info!("Client writer stopped");
                Flow::Stop
            }
        }
    }

    fn send_configuration(&mut self) -> RealtimeResult<()> {
        let slot = self.config_slot.take().ok_or(RealtimeError::NotConnected)?;
        let payload = janmitra_session_update().to_json()?;
        slot.send(Frame::Text(payload));
        Ok(())
    }

    /// Close both peers. Upstream goes first so the provider stops
    /// producing before the client socket is released.
    pub async fn close(&mut self) {
        if self.state.is_closed() {
            return;
        }
        self.transition(SessionState::Closed);

        // A held slot keeps the upstream queue open past close()
        self.config_slot = None;
        if let Some(upstream) = self.upstream.as_mut() {
            upstream.close().await;
        }
        self.downstream.close().await;
    }
}
