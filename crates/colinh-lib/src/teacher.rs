//! Reply producers behind the HTTP endpoint.

use colinh_core::reply::generate_reply;

use crate::error::Result;

/// Something that answers a learner's utterance.
pub trait Teacher: Send + Sync {
    fn reply(&self, utterance: &str) -> Result<String>;
}

/// The keyword-rule teacher. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTeacher;

impl Teacher for RuleTeacher {
    fn reply(&self, utterance: &str) -> Result<String> {
        Ok(generate_reply(utterance))
    }
}
