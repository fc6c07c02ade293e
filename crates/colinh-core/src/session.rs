//! Voice-mode session state.
//!
//! One record per client holding the five flags the voice page renders:
//! listening, transcript, reply, error, loading. Each capture cycle is
//! single-shot:
//!
//! ```text
//! Idle ─start_listening─▶ Listening ─on_transcript─▶ Loading ─finish_request─▶ Answered
//!                              │                         └────────────────────▶ Failed
//!                              └─on_capture_error─▶ Failed
//! ```
//!
//! Without speech capture the session is stuck in `Unsupported` and
//! `start_listening` never succeeds.

use crate::speech::{Capabilities, SpeechRequest};

/// Greeting shown before the first capture.
pub const WELCOME_MESSAGE: &str = "Xin chào! Tôi là Cô Linh, giáo viên tiếng Việt của bạn. \
     Hãy bấm nút micro để bắt đầu nói chuyện với tôi! 🌸";

pub const UNSUPPORTED_MESSAGE: &str = "Trình duyệt của bạn không hỗ trợ tính năng ghi âm.";

pub const MISSING_REPLY_MESSAGE: &str = "Không có phản hồi từ Cô Linh.";

const CAPTURE_ERROR_PREFIX: &str = "Lỗi nhận diện giọng nói: ";
const REQUEST_ERROR_PREFIX: &str = "Lỗi khi gọi API: ";

/// Observable phase, derived from the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unsupported,
    Idle,
    Listening,
    Loading,
    Answered,
    Failed,
}

/// How the endpoint call for a transcript ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    Reply(String),
    /// Success status but no usable `reply` field.
    Missing,
    /// Transport failure or non-success status.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct VoiceSession {
    capture_supported: bool,
    listening: bool,
    loading: bool,
    transcript: Option<String>,
    reply: Option<String>,
    error: Option<String>,
}

impl VoiceSession {
    pub fn new(capabilities: Capabilities) -> Self {
        let capture_supported = capabilities.speech_capture;
        Self {
            capture_supported,
            listening: false,
            loading: false,
            transcript: None,
            reply: Some(WELCOME_MESSAGE.to_string()),
            error: (!capture_supported).then(|| UNSUPPORTED_MESSAGE.to_string()),
        }
    }

    pub fn phase(&self) -> Phase {
        if !self.capture_supported {
            Phase::Unsupported
        } else if self.listening {
            Phase::Listening
        } else if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.transcript.is_some() && self.reply.is_some() {
            Phase::Answered
        } else {
            Phase::Idle
        }
    }

    /// Begin a capture cycle. Returns `false` (and changes nothing) while
    /// already listening or when capture is unsupported.
    pub fn start_listening(&mut self) -> bool {
        if !self.capture_supported || self.listening {
            return false;
        }
        self.transcript = None;
        self.reply = None;
        self.error = None;
        self.listening = true;
        true
    }

    /// Final transcript delivered; the endpoint call is now in flight.
    pub fn on_transcript(&mut self, text: &str) {
        self.transcript = Some(text.to_string());
        self.loading = true;
    }

    pub fn on_capture_error(&mut self, reason: &str) {
        self.error = Some(format!("{CAPTURE_ERROR_PREFIX}{reason}"));
        self.listening = false;
    }

    pub fn on_capture_end(&mut self) {
        self.listening = false;
    }

    /// Settle the in-flight request. Returns the utterance to speak on success.
    pub fn finish_request(&mut self, outcome: ReplyOutcome) -> Option<SpeechRequest> {
        self.loading = false;
        match outcome {
            ReplyOutcome::Reply(reply) if !reply.is_empty() => {
                let speech = SpeechRequest::for_reply(reply.as_str());
                self.reply = Some(reply);
                Some(speech)
            }
            ReplyOutcome::Reply(_) | ReplyOutcome::Missing => {
                self.error = Some(MISSING_REPLY_MESSAGE.to_string());
                None
            }
            ReplyOutcome::Failed(reason) => {
                self.error = Some(format!("{REQUEST_ERROR_PREFIX}{reason}"));
                None
            }
        }
    }

    pub fn capture_supported(&self) -> bool {
        self.capture_supported
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
