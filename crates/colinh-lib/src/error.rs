//! Error types for the teacher engine.

use thiserror::Error;

/// Result type alias for colinh-lib operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Teacher could not produce a reply
    #[error("teacher error: {0}")]
    Teacher(String),

    /// Transport-level HTTP failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("unexpected status {0}")]
    Status(u16),

    /// Endpoint answered without a `reply` field
    #[error("response has no reply")]
    MissingReply,

    /// Speech capture failed
    #[error("capture error: {0}")]
    Capture(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
