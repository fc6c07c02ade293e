//! colinh-lib — Cô Linh teacher engine.
//!
//! HTTP endpoint, browser pages, endpoint client, and the voice-mode driver.
//! Depends on colinh-core for reply rules, wire types and session state.

pub mod client;
pub mod error;
pub mod pages;
pub mod server;
pub mod teacher;
pub mod voice;

pub use error::{Error, Result};

// Re-export colinh-core for convenience
pub use colinh_core;
