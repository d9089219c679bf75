//! Incremental agent output

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One increment of agent output.
///
/// A chunk comes either from the conversational layer (`agent`) or from the
/// tool layer (`tools`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsUpdate>,
}

/// Messages produced by the tool layer in one chunk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsUpdate {
    #[serde(default)]
    pub messages: Vec<ToolMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    #[serde(default)]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AgentChunk {
    /// Chunk from the conversational layer
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            agent: Some(serde_json::json!({ "messages": [{ "content": text.into() }] })),
            tools: None,
        }
    }

    /// Chunk carrying one tool message
    pub fn tools(content: impl Into<String>) -> Self {
        Self {
            agent: None,
            tools: Some(ToolsUpdate {
                messages: vec![ToolMessage {
                    content: Value::String(content.into()),
                    name: None,
                }],
            }),
        }
    }

    /// Text of the first tool message, if this chunk carries tool output
    pub fn tool_output(&self) -> Option<String> {
        let message = self.tools.as_ref()?.messages.first()?;
        let text = match &message.content {
            Value::Null => return None,
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
