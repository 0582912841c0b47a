//! Realtime voice relay.
//!
//! One [`Session`] per upgraded client connection. The session dials the
//! provider, sends the assistant configuration once the provider reports
//! `session.created`, and from then on passes frames through untouched in
//! both directions. Each side is written by its own task behind a bounded
//! queue; a frame that finds the queue full is dropped rather than waited on.

mod bridge;
mod frame;
mod peer;
mod session;

pub use bridge::run_session;
pub use frame::{Frame, Inbound, WireMessage};
pub use peer::{ForwardOutcome, Peer};
pub use session::{Flow, Session, SessionState};

use crate::core::realtime::RealtimeConfig;

/// Everything a session needs, resolved from `ServerConfig` at admission.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub upstream: RealtimeConfig,
    /// Frames each peer's writer queue holds before dropping
    pub write_buffer: usize,
}
