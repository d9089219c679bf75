//! In-process agent driven by a script
//!
//! Stands in for the agent runtime in tests and in the server's echo mode.

use async_trait::async_trait;
use futures::stream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::chunk::AgentChunk;
use crate::error::{AgentError, Result};
use crate::provider::{AgentProvider, AgentSession, ChunkStream, InitializedAgent};
use crate::session::SessionConfig;

type Script = dyn Fn(&str) -> Result<Vec<AgentChunk>> + Send + Sync;

/// Agent that answers every instruction with the chunks its script returns
#[derive(Clone)]
pub struct ScriptedAgent {
    script: Arc<Script>,
    instructions: Arc<Mutex<Vec<String>>>,
    initializations: Arc<AtomicUsize>,
    init_failure: Option<String>,
    config: SessionConfig,
}

impl ScriptedAgent {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<AgentChunk>> + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            instructions: Arc::new(Mutex::new(Vec::new())),
            initializations: Arc::new(AtomicUsize::new(0)),
            init_failure: None,
            config: SessionConfig::default(),
        }
    }

    /// Agent that narrates, then echoes the instruction as tool output
    pub fn echo() -> Self {
        Self::new(|instruction| {
            Ok(vec![
                AgentChunk::agent(format!("Working on: {}", instruction)),
                AgentChunk::tools(instruction),
            ])
        })
    }

    /// Make every initialization fail with the given message
    pub fn with_init_failure(mut self, message: impl Into<String>) -> Self {
        self.init_failure = Some(message.into());
        self
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Instructions received so far, in order
    pub async fn instructions(&self) -> Vec<String> {
        self.instructions.lock().await.clone()
    }

    /// Number of initializations so far
    pub fn initializations(&self) -> usize {
        self.initializations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentSession for ScriptedAgent {
    async fn stream(&self, instruction: &str, _config: &SessionConfig) -> Result<ChunkStream> {
        debug!("Scripted agent received: {}", instruction);
        self.instructions.lock().await.push(instruction.to_string());

        let chunks = (self.script)(instruction)?;
        Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
    }
}

#[async_trait]
impl AgentProvider for ScriptedAgent {
    async fn initialize(&self) -> Result<InitializedAgent> {
        self.initializations.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.init_failure {
            return Err(AgentError::initialization(message.clone()));
        }

        Ok(InitializedAgent {
            session: Arc::new(self.clone()),
            config: self.config.clone(),
        })
    }
}
