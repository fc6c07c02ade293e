//! colinh-core — Reply rules, wire types, and voice session state.
//!
//! No async runtime, no I/O, no platform dependencies.

pub mod reply;
pub mod session;
pub mod speech;
pub mod types;
