//! Error types for agent-runner

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur while talking to the agent runtime
#[derive(Debug, Error)]
pub enum AgentError {
    /// Agent could not be initialized
    #[error("Agent initialization failed: {message}")]
    Initialization { message: String },

    /// Wallet credential storage failed
    #[error("Wallet credential error: {0}")]
    Credentials(#[from] statuette_core::Error),

    /// HTTP request to the runtime failed
    #[error("Agent runtime request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Runtime answered with a non-success status
    #[error("Agent runtime returned {status}: {message}")]
    Runtime { status: u16, message: String },

    /// Streamed output could not be read or decoded
    #[error("Agent stream error: {message}")]
    Stream { message: String },
}

impl AgentError {
    /// Create an Initialization error
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    /// Create a Runtime error
    pub fn runtime(status: u16, message: impl Into<String>) -> Self {
        Self::Runtime {
            status,
            message: message.into(),
        }
    }

    /// Create a Stream error
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }
}
