//! OpenAI Realtime API module.
//!
//! The relay dials the Realtime API once per voice session, applies the
//! Janmitra session configuration after `session.created`, and otherwise
//! treats provider events as opaque frames.
//!
//! # Audio Format
//!
//! Input and output audio is PCM 16-bit signed little-endian at 24kHz.

mod client;
mod config;
mod messages;
mod session;

pub use client::{UpstreamSocket, build_upstream_request, connect_upstream};
pub use config::{
    DEFAULT_UPSTREAM_URL, Modality, OPENAI_BETA_HEADER, OPENAI_BETA_REALTIME,
    OpenAIRealtimeAudioFormat, OpenAIRealtimeVoice,
};
pub use messages::{
    ClientEvent, InputAudioTranscription, MaxTokens, ServerEventEnvelope, SessionConfig,
    TurnDetection,
};
pub use session::{
    SUPPORTED_LANGUAGES, janmitra_instructions, janmitra_session, janmitra_session_update,
};
