//! Chat model definitions

use serde::{Deserialize, Serialize};

/// Who produced a displayable message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Output of the agent's tool layer, or a notice from the app itself
    Tools,
    /// Text typed by the user
    User,
}

/// One displayable chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl ChatResponse {
    pub fn tools(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageKind::Tools,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageKind::User,
        }
    }

    pub fn is_user(&self) -> bool {
        self.kind == MessageKind::User
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `POST /api/chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    pub responses: Vec<ChatResponse>,
}
