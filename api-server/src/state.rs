//! Application state

use std::sync::Arc;

use agent_runner::{
    AgentKitClient, AgentKitConfig, AgentKitProvider, AgentProvider, ChatExecutor, ScriptedAgent,
    SessionConfig,
};
use statuette_core::wallet::FileWalletStore;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    executor: ChatExecutor,
}

impl AppState {
    /// Create state with the provider selected by the configuration
    pub fn new(config: ServerConfig) -> Self {
        let provider: Arc<dyn AgentProvider> = if config.echo_mode {
            Arc::new(ScriptedAgent::echo().with_config(SessionConfig::new(config.thread_id.clone())))
        } else {
            Arc::new(AgentKitProvider::new(
                AgentKitClient::new(config.agent_runtime_url.clone()),
                Arc::new(FileWalletStore::new(config.wallet_data_file.clone())),
                AgentKitConfig {
                    model: config.agent_model.clone(),
                    network_id: config.network_id.clone(),
                    thread_id: config.thread_id.clone(),
                },
            ))
        };

        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: ServerConfig, provider: Arc<dyn AgentProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                executor: ChatExecutor::new(provider),
            }),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    pub fn executor(&self) -> &ChatExecutor {
        &self.inner.executor
    }
}
