//! HTTP client for `POST /api/co-linh`.

use serde::Deserialize;
use tracing::debug;

use colinh_core::types::{CO_LINH_PATH, ReplyRequest, TeacherReply};

use crate::error::{Error, Result};

/// Cloneable handle to a running teacher server.
#[derive(Clone)]
pub struct TeacherClient {
    http: reqwest::Client,
    base_url: String,
}

/// Response as it arrives, before checking for a reply.
#[derive(Deserialize)]
struct RawReply {
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl TeacherClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send an utterance and return the teacher's reply.
    ///
    /// Fails on transport errors, non-success status, or a body without a
    /// non-empty `reply`.
    pub async fn ask(&self, text: &str) -> Result<TeacherReply> {
        let url = format!("{}{CO_LINH_PATH}", self.base_url);
        debug!(%url, text_len = text.len(), "asking teacher");

        let resp = self
            .http
            .post(&url)
            .json(&ReplyRequest::new(text))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let raw: RawReply = resp.json().await?;
        match raw.reply {
            Some(reply) if !reply.is_empty() => Ok(TeacherReply {
                reply,
                timestamp: raw.timestamp,
            }),
            _ => Err(Error::MissingReply),
        }
    }
}
