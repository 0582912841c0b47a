//! Realtime voice provider module.
//!
//! Only the OpenAI Realtime API is supported. The relay needs three things
//! from a provider: a way to dial it, a way to recognise the event that
//! marks its session as ready, and the configuration event to send back.

mod base;
pub mod openai;

pub use base::{RealtimeConfig, RealtimeError, RealtimeResult};
pub use openai::{
    DEFAULT_UPSTREAM_URL, ServerEventEnvelope, UpstreamSocket, connect_upstream,
    janmitra_session_update,
};
