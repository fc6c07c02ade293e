//! Voice driver and client tests against a live listener.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use colinh_lib::client::TeacherClient;
use colinh_lib::colinh_core::session::{MISSING_REPLY_MESSAGE, Phase, UNSUPPORTED_MESSAGE};
use colinh_lib::colinh_core::speech::SpeechRequest;
use colinh_lib::server::{AppState, router};
use colinh_lib::voice::{Cycle, SpeechCapture, SpeechPlayback, VoiceTeacher};
use colinh_lib::{Error, Result};

/// Hands out scripted captures in order, then reports exhaustion.
struct ScriptedCapture {
    script: VecDeque<Result<String>>,
}

impl ScriptedCapture {
    fn new(script: Vec<Result<String>>) -> Self {
        Self {
            script: script.into(),
        }
    }

    fn saying(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| Ok(l.to_string())).collect())
    }
}

impl SpeechCapture for ScriptedCapture {
    async fn listen(&mut self) -> Result<Option<String>> {
        self.script.pop_front().transpose()
    }
}

#[derive(Clone, Default)]
struct RecordingPlayback {
    spoken: Arc<Mutex<Vec<SpeechRequest>>>,
}

impl RecordingPlayback {
    fn spoken(&self) -> Vec<SpeechRequest> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechPlayback for RecordingPlayback {
    fn speak(&self, request: &SpeechRequest) {
        self.spoken.lock().unwrap().push(request.clone());
    }
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_teacher() -> TeacherClient {
    TeacherClient::new(spawn(router(AppState::default())).await)
}

// ── client ──────────────────────────────────────────────────────────

#[tokio::test]
async fn client_gets_reply_and_timestamp() {
    let client = spawn_teacher().await;
    let reply = client.ask("Bạn tên là gì?").await.unwrap();
    assert!(reply.reply.contains("Tôi tên là Cô Linh!"));
    assert!(reply.timestamp.is_some());
}

#[tokio::test]
async fn client_tolerates_trailing_slash() {
    let base = spawn(router(AppState::default())).await;
    let client = TeacherClient::new(format!("{base}/"));
    assert_eq!(client.base_url(), base);
    assert!(client.ask("chào").await.is_ok());
}

#[tokio::test]
async fn client_rejects_error_status() {
    let app = Router::new().route("/api/co-linh", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let client = TeacherClient::new(spawn(app).await);
    assert!(matches!(client.ask("chào").await, Err(Error::Status(500))));
}

#[tokio::test]
async fn client_rejects_body_without_reply() {
    let app = Router::new().route("/api/co-linh", post(|| async { axum::Json(serde_json::json!({})) }));
    let client = TeacherClient::new(spawn(app).await);
    assert!(matches!(client.ask("chào").await, Err(Error::MissingReply)));
}

// ── voice driver ────────────────────────────────────────────────────

#[tokio::test]
async fn cycle_answers_and_speaks_once() {
    let playback = RecordingPlayback::default();
    let mut teacher = VoiceTeacher::new(
        spawn_teacher().await,
        Some(ScriptedCapture::saying(&["Cảm ơn cô"])),
        Some(playback.clone()),
    );

    assert_eq!(teacher.listen_once().await, Cycle::Done);

    let session = teacher.session();
    assert_eq!(session.phase(), Phase::Answered);
    assert_eq!(session.transcript(), Some("Cảm ơn cô"));
    assert!(session.reply().unwrap().starts_with("Không có chi!"));
    assert!(!session.is_listening());
    assert!(!session.is_loading());

    let spoken = playback.spoken();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0], SpeechRequest::for_reply(session.reply().unwrap()));
    assert_eq!(spoken[0].rate, 0.9);
    assert_eq!(spoken[0].pitch, 1.1);
}

#[tokio::test]
async fn each_reply_is_a_separate_utterance() {
    let playback = RecordingPlayback::default();
    let mut teacher = VoiceTeacher::new(
        spawn_teacher().await,
        Some(ScriptedCapture::saying(&["Xin chào", "Tôi tên là An"])),
        Some(playback.clone()),
    );

    assert_eq!(teacher.listen_once().await, Cycle::Done);
    assert_eq!(teacher.listen_once().await, Cycle::Done);
    assert!(teacher.session().reply().unwrap().contains("My name is"));

    // Starting a capture clears the last reply, even when nothing is heard.
    assert_eq!(teacher.listen_once().await, Cycle::Exhausted);
    assert_eq!(teacher.session().reply(), None);
    assert!(!teacher.session().is_listening());

    assert_eq!(playback.spoken().len(), 2);
}

#[tokio::test]
async fn rejected_request_sets_error_only() {
    // Nothing listens on a port we just released.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let playback = RecordingPlayback::default();
    let mut teacher = VoiceTeacher::new(
        TeacherClient::new(format!("http://{addr}")),
        Some(ScriptedCapture::saying(&["Xin chào"])),
        Some(playback.clone()),
    );

    assert_eq!(teacher.listen_once().await, Cycle::Done);

    let session = teacher.session();
    assert_eq!(session.phase(), Phase::Failed);
    assert!(session.error().unwrap().starts_with("Lỗi khi gọi API: "));
    assert_eq!(session.reply(), None);
    assert!(!session.is_loading());
    assert!(playback.spoken().is_empty());
}

#[tokio::test]
async fn missing_reply_is_reported() {
    let app = Router::new().route("/api/co-linh", post(|| async { axum::Json(serde_json::json!({ "reply": "" })) }));
    let mut teacher = VoiceTeacher::new(
        TeacherClient::new(spawn(app).await),
        Some(ScriptedCapture::saying(&["chào"])),
        None::<RecordingPlayback>,
    );

    teacher.listen_once().await;
    assert_eq!(teacher.session().error(), Some(MISSING_REPLY_MESSAGE));
    assert_eq!(teacher.session().reply(), None);
}

#[tokio::test]
async fn capture_error_is_displayed() {
    let mut teacher = VoiceTeacher::new(
        spawn_teacher().await,
        Some(ScriptedCapture::new(vec![Err(Error::Capture("no-speech".into()))])),
        None::<RecordingPlayback>,
    );

    assert_eq!(teacher.listen_once().await, Cycle::Done);
    let session = teacher.session();
    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(
        session.error(),
        Some("Lỗi nhận diện giọng nói: capture error: no-speech")
    );
    assert!(!session.is_listening());
}

#[tokio::test]
async fn missing_capture_never_starts() {
    let mut teacher = VoiceTeacher::new(
        spawn_teacher().await,
        None::<ScriptedCapture>,
        Some(RecordingPlayback::default()),
    );

    assert_eq!(teacher.session().phase(), Phase::Unsupported);
    assert_eq!(teacher.listen_once().await, Cycle::Unavailable);
    assert_eq!(teacher.session().error(), Some(UNSUPPORTED_MESSAGE));
    assert!(!teacher.session().is_listening());
}

#[tokio::test]
async fn reply_without_playback_is_still_rendered() {
    let mut teacher = VoiceTeacher::new(
        spawn_teacher().await,
        Some(ScriptedCapture::saying(&["con mèo"])),
        None::<RecordingPlayback>,
    );

    teacher.listen_once().await;
    assert!(teacher.session().reply().unwrap().contains("\"con mèo\""));
}
