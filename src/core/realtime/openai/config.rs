//! OpenAI Realtime API configuration types.
//!
//! Provider constants plus the typed values used in the relay's session
//! configuration.

use serde::{Deserialize, Serialize};

/// Endpoint the relay dials when no override is configured.
pub const DEFAULT_UPSTREAM_URL: &str =
    "wss://api.openai.com/v1/realtime?model=gpt-4o-realtime-preview-2024-10-01";

/// Beta feature header required by the Realtime API (`OpenAI-Beta`).
pub const OPENAI_BETA_HEADER: &str = "openai-beta";

/// Value of the beta feature header.
pub const OPENAI_BETA_REALTIME: &str = "realtime=v1";

/// Voice for audio output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIRealtimeVoice {
    #[default]
    Alloy,
}

/// Audio sample encoding on both directions of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIRealtimeAudioFormat {
    /// PCM 16-bit signed little-endian at 24kHz
    #[default]
    Pcm16,
}

/// Response modalities for the Realtime API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Audio,
}
