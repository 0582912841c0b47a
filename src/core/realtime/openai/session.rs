//! The Janmitra assistant session.
//!
//! Every relayed voice session is configured identically: a civic-assistance
//! persona for Indian citizens, text and audio output, server-side turn
//! detection, and Whisper transcription of the caller's speech.

use super::config::{Modality, OpenAIRealtimeAudioFormat, OpenAIRealtimeVoice};
use super::messages::{
    ClientEvent, InputAudioTranscription, MaxTokens, SessionConfig, TurnDetection,
};

/// Languages the assistant offers to converse in.
pub const SUPPORTED_LANGUAGES: [&str; 11] = [
    "English",
    "Hindi",
    "Tamil",
    "Telugu",
    "Bengali",
    "Marathi",
    "Gujarati",
    "Kannada",
    "Malayalam",
    "Punjabi",
    "Odia",
];

pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

pub const VAD_THRESHOLD: f32 = 0.5;
pub const VAD_PREFIX_PADDING_MS: u32 = 300;
pub const VAD_SILENCE_DURATION_MS: u32 = 1000;

pub const TEMPERATURE: f32 = 0.8;

const PERSONA: &str = "You are Janmitra, a helpful AI assistant for Indian citizens. \
You help them understand their civic rights, government schemes, legal issues, and how to \
report problems to authorities. Provide accurate information about Indian laws, rights, and \
government services. Be empathetic and supportive. Guide users on proper channels for \
complaints and grievances. Explain legal concepts in simple language. Recommend relevant \
government schemes. Help users understand RTI processes.";

/// System instructions sent with the session configuration.
pub fn janmitra_instructions() -> String {
    match SUPPORTED_LANGUAGES.split_last() {
        Some((last, rest)) => format!(
            "{PERSONA} You can speak in multiple languages including {}, and {}.",
            rest.join(", "),
            last
        ),
        None => PERSONA.to_string(),
    }
}

/// The session configuration applied to every relayed session.
pub fn janmitra_session() -> SessionConfig {
    SessionConfig {
        modalities: vec![Modality::Text, Modality::Audio],
        instructions: janmitra_instructions(),
        voice: OpenAIRealtimeVoice::Alloy,
        input_audio_format: OpenAIRealtimeAudioFormat::Pcm16,
        output_audio_format: OpenAIRealtimeAudioFormat::Pcm16,
        input_audio_transcription: InputAudioTranscription {
            model: TRANSCRIPTION_MODEL.to_string(),
        },
        turn_detection: TurnDetection::ServerVad {
            threshold: VAD_THRESHOLD,
            prefix_padding_ms: VAD_PREFIX_PADDING_MS,
            silence_duration_ms: VAD_SILENCE_DURATION_MS,
        },
        temperature: TEMPERATURE,
        max_response_output_tokens: MaxTokens::Unbounded,
    }
}

/// The one-time `session.update` event.
pub fn janmitra_session_update() -> ClientEvent {
    ClientEvent::session_update(janmitra_session())
}
