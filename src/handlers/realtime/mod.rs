//! Realtime voice WebSocket handlers
//!
//! # Protocol
//!
//! After the upgrade the socket speaks the OpenAI Realtime API event protocol
//! directly; the relay adds nothing and strips nothing.
//!
//! ## Client -> Server
//!
//! - Any Realtime API client event (`input_audio_buffer.append`, ...)
//! - Text or binary frames, forwarded to the provider as received
//!
//! ## Server -> Client
//!
//! - Every provider event, including `session.created`
//! - The relay's own `session.update` is never echoed back

mod handler;

pub use handler::{CORS_ALLOW_HEADERS, CORS_ALLOW_ORIGIN, realtime_voice_handler};
