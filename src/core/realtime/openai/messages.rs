//! OpenAI Realtime API WebSocket message types.
//!
//! The relay treats provider traffic as opaque. The only structure it needs
//! is the `type` discriminator of server events, and the one client event it
//! originates itself: `session.update`.
//!
//! Server events of interest:
//! - session.created - the provider-side session object exists
//!
//! Client events originated by the relay:
//! - session.update - configure the session once, after session.created

use serde::{Deserialize, Serialize};

use super::config::{Modality, OpenAIRealtimeAudioFormat, OpenAIRealtimeVoice};

/// Server event signalling that the provider created its session object.
pub const SESSION_CREATED: &str = "session.created";

// =============================================================================
// Server Events (received from provider)
// =============================================================================

/// Minimal view of a provider event.
///
/// Every other field is ignored; the original payload is forwarded untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerEventEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
}

impl ServerEventEnvelope {
    /// Parse the discriminator out of a raw event payload.
    pub fn parse(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    #[inline]
    pub fn is_session_created(&self) -> bool {
        self.event_type == SESSION_CREATED
    }
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Session configuration for OpenAI Realtime API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Response modalities (text, audio)
    pub modalities: Vec<Modality>,

    /// System instructions for the assistant
    pub instructions: String,

    /// Voice for audio output
    pub voice: OpenAIRealtimeVoice,

    pub input_audio_format: OpenAIRealtimeAudioFormat,
    pub output_audio_format: OpenAIRealtimeAudioFormat,

    /// Input audio transcription configuration
    pub input_audio_transcription: InputAudioTranscription,

    /// Turn detection configuration
    pub turn_detection: TurnDetection,

    /// Temperature for response generation
    pub temperature: f32,

    /// Maximum response output tokens
    pub max_response_output_tokens: MaxTokens,
}

/// Response length cap. The relay never limits it, which the API spells
/// as the string `"inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxTokens {
    #[serde(rename = "inf")]
    Unbounded,
}

/// Input audio transcription configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAudioTranscription {
    /// Transcription model (e.g., "whisper-1")
    pub model: String,
}

/// Turn detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurnDetection {
    /// Server-side voice activity detection
    #[serde(rename = "server_vad")]
    ServerVad {
        /// Activation threshold (0.0 to 1.0)
        threshold: f32,
        /// Audio kept before detected speech, in ms
        prefix_padding_ms: u32,
        /// Silence that ends a turn, in ms
        silence_duration_ms: u32,
    },
}

// =============================================================================
// Client Events (sent to provider)
// =============================================================================

/// Client events the relay originates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Update session configuration
    #[serde(rename = "session.update")]
    SessionUpdate {
        /// Session configuration
        session: SessionConfig,
    },
}

impl ClientEvent {
    pub fn session_update(session: SessionConfig) -> Self {
        Self::SessionUpdate { session }
    }

    /// Encode for the wire.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
