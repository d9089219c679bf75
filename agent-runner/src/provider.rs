//! Agent Session Provider traits
//!
//! The seam between chat dispatch and whatever runs the agent: the HTTP
//! runtime in production, a scripted agent in tests and demos.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;

use crate::chunk::AgentChunk;
use crate::error::Result;
use crate::session::SessionConfig;

/// Stream of incremental output for one instruction
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<AgentChunk>> + Send>>;

/// An initialized agent able to run instructions
#[async_trait]
pub trait AgentSession: Send + Sync {
    /// Submit one instruction and stream the agent's output
    async fn stream(&self, instruction: &str, config: &SessionConfig) -> Result<ChunkStream>;
}

/// Supplies agents bound to a wallet and a toolset
#[async_trait]
pub trait AgentProvider: Send + Sync {
    /// Initialize an agent, persisting the wallet credentials it exports
    async fn initialize(&self) -> Result<InitializedAgent>;
}

/// Result of one agent initialization
#[derive(Clone)]
pub struct InitializedAgent {
    pub session: Arc<dyn AgentSession>,
    pub config: SessionConfig,
}
