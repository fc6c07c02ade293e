//! Shared types for the Cô Linh server and its clients.
//!
//! Wire shapes live here so the CLI and other consumers can speak the endpoint
//! contract without pulling in axum or tokio.

use serde::{Deserialize, Serialize};

use crate::reply::{APOLOGY_REPLY, EMPTY_INPUT_PROMPT};

/// Path of the teacher endpoint.
pub const CO_LINH_PATH: &str = "/api/co-linh";

// ─── Server config ────────────────────────────────────────────────────────

/// Listen address for the teacher server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ─── Endpoint types ───────────────────────────────────────────────────────

/// Body of `POST /api/co-linh`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl ReplyRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// The utterance, if it has any non-whitespace content.
    pub fn utterance(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Successful endpoint response. `timestamp` is present only on a real answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherReply {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl TeacherReply {
    pub fn answered(reply: String, timestamp: String) -> Self {
        Self {
            reply,
            timestamp: Some(timestamp),
        }
    }

    /// Nudge for an empty utterance.
    pub fn prompt() -> Self {
        Self {
            reply: EMPTY_INPUT_PROMPT.to_string(),
            timestamp: None,
        }
    }

    /// Stand-in reply when the teacher failed.
    pub fn apology() -> Self {
        Self {
            reply: APOLOGY_REPLY.to_string(),
            timestamp: None,
        }
    }
}

/// Machine-readable error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn method_not_allowed() -> Self {
        Self {
            error: "Method not allowed".into(),
        }
    }
}
