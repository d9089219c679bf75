//! Agent Runner - bridge between the chat service and the agent runtime
//!
//! This crate initializes agent sessions against the external agent
//! runtime, streams instructions through them, and turns the streamed
//! tool output into chat responses.

mod chunk;
mod client;
mod dispatcher;
mod error;
mod executor;
mod parser;
mod provider;
mod scripted;
mod session;

pub use chunk::{AgentChunk, ToolMessage, ToolsUpdate};
pub use client::{
    AgentKitClient, AgentKitConfig, AgentKitProvider, ConfigureRequest, ConfigureResponse,
    AGENT_INSTRUCTIONS, DEFAULT_MODEL,
};
pub use dispatcher::dispatch;
pub use error::{AgentError, Result};
pub use executor::{run_autonomous_action, run_autonomous_cycle, ChatExecutor};
pub use parser::decode_sse;
pub use provider::{AgentProvider, AgentSession, ChunkStream, InitializedAgent};
pub use scripted::ScriptedAgent;
pub use session::{SessionConfig, DEFAULT_THREAD_ID};
