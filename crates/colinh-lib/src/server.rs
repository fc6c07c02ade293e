//! HTTP API for the Cô Linh teacher.
//!
//! Runs on port 3000 by default. CORS is open to any origin so the pages can
//! be served from elsewhere and still call `/api/co-linh`. The CORS layer
//! answers every `OPTIONS` request itself (200, empty body); the endpoint's
//! other responses also carry the allowed methods and headers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use colinh_core::types::{CO_LINH_PATH, ErrorBody, ReplyRequest, TeacherReply};

use crate::pages;
use crate::teacher::{RuleTeacher, Teacher};

/// Shared router state. Immutable, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    teacher: Arc<dyn Teacher>,
}

impl AppState {
    pub fn new(teacher: impl Teacher + 'static) -> Self {
        Self {
            teacher: Arc::new(teacher),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RuleTeacher)
    }
}

/// Build the axum router around a [`Teacher`].
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            CO_LINH_PATH,
            post(co_linh)
                .fallback(method_not_allowed)
                // Utterances have no length cap.
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer::<_, std::convert::Infallible>(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("POST, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                )),
        )
        .route("/", get(pages::text_page))
        .route("/voice", get(pages::voice_page))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─── Handlers ──────────────────────────────────────────────────────────────

async fn co_linh(
    State(state): State<AppState>,
    body: Result<Json<ReplyRequest>, JsonRejection>,
) -> Json<TeacherReply> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!(%rejection, "unreadable body, treating as empty");
            ReplyRequest::default()
        }
    };

    let Some(utterance) = req.utterance() else {
        return Json(TeacherReply::prompt());
    };

    match state.teacher.reply(utterance) {
        Ok(reply) => Json(TeacherReply::answered(reply, now_iso8601())),
        Err(e) => {
            // Client still gets something it can speak.
            error!(error = %e, "reply generation failed");
            Json(TeacherReply::apology())
        }
    }
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::method_not_allowed()),
    )
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
