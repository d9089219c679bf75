//! Agent session configuration

use serde::{Deserialize, Serialize};

/// Conversation thread used when none is configured
pub const DEFAULT_THREAD_ID: &str = "AgentStatuette Chatbot";

/// Per-initialization settings passed along with every instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Conversation thread the runtime keys its memory on
    pub thread_id: String,
}

impl SessionConfig {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THREAD_ID)
    }
}
