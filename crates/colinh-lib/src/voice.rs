//! Voice-mode driver — capture → endpoint → playback, one cycle at a time.
//!
//! ```text
//! listen_once: start_listening → SpeechCapture::listen → TeacherClient::ask
//!     → VoiceSession::finish_request → SpeechPlayback::speak (fire-and-forget)
//! ```
//!
//! Capture and playback are both optional. A driver built without capture
//! reports `Cycle::Unavailable` forever; without playback replies are only
//! rendered, never spoken.

use std::future::Future;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info, warn};

use colinh_core::session::{ReplyOutcome, VoiceSession};
use colinh_core::speech::{Capabilities, SpeechRequest};

use crate::client::TeacherClient;
use crate::error::{Error, Result};

/// Speech-to-text source. Each call is one single-shot capture yielding the
/// final transcript, or `None` when the source is exhausted.
pub trait SpeechCapture {
    fn listen(&mut self) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Speech-synthesis sink. Must not block; the request is not awaited.
pub trait SpeechPlayback {
    fn speak(&self, request: &SpeechRequest);
}

/// Result of one [`VoiceTeacher::listen_once`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// The session was updated with a reply or an error.
    Done,
    /// The capture source has nothing more to give.
    Exhausted,
    /// No capture capability, or a capture is already running.
    Unavailable,
}

pub struct VoiceTeacher<C, P> {
    session: VoiceSession,
    capture: Option<C>,
    playback: Option<P>,
    client: TeacherClient,
}

impl<C: SpeechCapture, P: SpeechPlayback> VoiceTeacher<C, P> {
    pub fn new(client: TeacherClient, capture: Option<C>, playback: Option<P>) -> Self {
        let capabilities = Capabilities {
            speech_capture: capture.is_some(),
            speech_playback: playback.is_some(),
        };
        if !capabilities.speech_playback {
            info!("no speech playback, replies will not be spoken");
        }
        Self {
            session: VoiceSession::new(capabilities),
            capture,
            playback,
            client,
        }
    }

    pub fn session(&self) -> &VoiceSession {
        &self.session
    }

    /// Run one capture cycle to completion.
    pub async fn listen_once(&mut self) -> Cycle {
        let Some(capture) = self.capture.as_mut() else {
            return Cycle::Unavailable;
        };
        if !self.session.start_listening() {
            return Cycle::Unavailable;
        }

        let transcript = match capture.listen().await {
            Ok(Some(text)) => text,
            Ok(None) => {
                self.session.on_capture_end();
                return Cycle::Exhausted;
            }
            Err(e) => {
                warn!(error = %e, "speech capture failed");
                self.session.on_capture_error(&e.to_string());
                return Cycle::Done;
            }
        };

        self.session.on_transcript(&transcript);
        self.session.on_capture_end();

        let outcome = match self.client.ask(&transcript).await {
            Ok(reply) => ReplyOutcome::Reply(reply.reply),
            Err(Error::MissingReply) => ReplyOutcome::Missing,
            Err(e) => {
                warn!(error = %e, "teacher request failed");
                ReplyOutcome::Failed(e.to_string())
            }
        };

        if let Some(speech) = self.session.finish_request(outcome) {
            match &self.playback {
                Some(playback) => playback.speak(&speech),
                None => debug!("reply not spoken, no playback"),
            }
        }
        Cycle::Done
    }
}

// ─── Terminal capabilities ────────────────────────────────────────────────

/// Reads one line from stdin per capture. EOF exhausts the source.
pub struct StdinCapture {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinCapture {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechCapture for StdinCapture {
    async fn listen(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }
}

/// Forwards utterances to a TTS server's `POST /speak`.
///
/// Each reply is a separate request; nothing is cancelled when a new reply
/// arrives mid-speech.
#[derive(Clone)]
pub struct HttpPlayback {
    http: reqwest::Client,
    speak_url: String,
}

impl HttpPlayback {
    pub fn new(tts_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            speak_url: format!("{}/speak", tts_url.trim_end_matches('/')),
        }
    }
}

impl SpeechPlayback for HttpPlayback {
    fn speak(&self, request: &SpeechRequest) {
        let http = self.http.clone();
        let url = self.speak_url.clone();
        let body = request.clone();
        tokio::spawn(async move {
            match http.post(&url).json(&body).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!(chars = body.text.len(), "utterance dispatched");
                }
                Ok(resp) => warn!(status = %resp.status(), "tts server rejected utterance"),
                Err(e) => warn!(error = %e, "tts server unreachable"),
            }
        });
    }
}
