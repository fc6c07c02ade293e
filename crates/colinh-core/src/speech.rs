//! Speech capability settings — what the voice page asks of speech
//! recognition (single-shot, final results only) and speech synthesis.

use serde::{Deserialize, Serialize};

/// Language tag for both capture and playback.
pub const SPEECH_LANG: &str = "vi-VN";

/// Playback rate for replies.
pub const SPEECH_RATE: f32 = 0.9;

/// Playback pitch for replies.
pub const SPEECH_PITCH: f32 = 1.1;

/// Optional speech features available to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub speech_capture: bool,
    pub speech_playback: bool,
}

/// One utterance handed to speech synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl SpeechRequest {
    /// Build the playback request for a teacher reply.
    pub fn for_reply(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: SPEECH_LANG.into(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        }
    }
}
