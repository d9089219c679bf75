//! Agent runtime HTTP client
//!
//! Talks to the agent runtime service that hosts the LLM, the wallet and
//! the onchain toolset.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use statuette_core::autonomous::DEFAULT_NETWORK_ID;
use statuette_core::wallet::{WalletCredentialStore, WalletCredentials};

use crate::error::{AgentError, Result};
use crate::parser::decode_sse;
use crate::provider::{AgentProvider, AgentSession, ChunkStream, InitializedAgent};
use crate::session::{SessionConfig, DEFAULT_THREAD_ID};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4";

/// System instructions the agent is configured with
pub const AGENT_INSTRUCTIONS: &str = "You are a helpful agent that can interact onchain using the Coinbase Developer Platform AgentKit. You are empowered to interact onchain using your tools. If you ever need funds, you can request them from the faucet if you are on network ID 'base-sepolia'. If not, you can provide your wallet details and request funds from the user. Before executing your first action, get the wallet details to see what network you're on. If there is a 5XX (internal) HTTP error code, ask the user to try again later. If someone asks you to do something you can't do with your currently available tools, you must say so, and encourage them to implement it themselves using the CDP SDK + Agentkit, recommend they go to docs.cdp.coinbase.com for more information. Be concise and helpful with your responses.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureRequest {
    pub model: String,
    pub instructions: String,
    pub network_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_data: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureResponse {
    pub agent_id: String,
    pub exported_wallet: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StreamRequest<'a> {
    thread_id: &'a str,
    messages: [HumanMessage<'a>; 1],
}

#[derive(Serialize)]
struct HumanMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    content: &'a str,
}

/// HTTP client for the agent runtime
#[derive(Clone)]
pub struct AgentKitClient {
    client: Client,
    url: String,
}

impl AgentKitClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            // Disable proxy for internal runtime communication
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            url: url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Create an agent bound to the given wallet
    pub async fn configure(&self, req: &ConfigureRequest) -> Result<ConfigureResponse> {
        info!(
            "Configuring agent at {}/agents (network: {})",
            self.url, req.network_id
        );

        let res = self
            .client
            .post(format!("{}/agents", self.url))
            .json(req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let error_text = res.text().await.unwrap_or_default();
            return Err(AgentError::runtime(status.as_u16(), error_text));
        }

        res.json::<ConfigureResponse>()
            .await
            .map_err(|e| AgentError::initialization(format!("Invalid configure response: {}", e)))
    }

    /// Submit one instruction and stream the decoded chunks
    pub async fn stream(
        &self,
        agent_id: &str,
        thread_id: &str,
        instruction: &str,
    ) -> Result<ChunkStream> {
        let req = StreamRequest {
            thread_id,
            messages: [HumanMessage {
                kind: "human",
                content: instruction,
            }],
        };

        debug!("Streaming instruction to agent {}", agent_id);

        let res = self
            .client
            .post(format!("{}/agents/{}/stream", self.url, agent_id))
            .header("Accept", "text/event-stream")
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let error_text = res.text().await.unwrap_or_default();
            return Err(AgentError::runtime(status.as_u16(), error_text));
        }

        Ok(decode_sse(res.bytes_stream().boxed()))
    }
}

/// Session bound to one configured runtime agent
struct RemoteAgentSession {
    client: AgentKitClient,
    agent_id: String,
}

#[async_trait]
impl AgentSession for RemoteAgentSession {
    async fn stream(&self, instruction: &str, config: &SessionConfig) -> Result<ChunkStream> {
        self.client
            .stream(&self.agent_id, &config.thread_id, instruction)
            .await
    }
}

/// Settings for agents created through the runtime
#[derive(Debug, Clone)]
pub struct AgentKitConfig {
    pub model: String,
    pub network_id: String,
    pub thread_id: String,
}

impl Default for AgentKitConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            network_id: DEFAULT_NETWORK_ID.to_string(),
            thread_id: DEFAULT_THREAD_ID.to_string(),
        }
    }
}

/// Provider creating runtime agents and persisting their wallets
pub struct AgentKitProvider {
    client: AgentKitClient,
    store: Arc<dyn WalletCredentialStore>,
    config: AgentKitConfig,
}

impl AgentKitProvider {
    pub fn new(
        client: AgentKitClient,
        store: Arc<dyn WalletCredentialStore>,
        config: AgentKitConfig,
    ) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    async fn load_wallet(&self) -> Option<WalletCredentials> {
        match self.store.load().await {
            Ok(credentials) => credentials,
            Err(e) => {
                // A fresh wallet is created when the blob can't be read
                error!("Error reading wallet data: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl AgentProvider for AgentKitProvider {
    async fn initialize(&self) -> Result<InitializedAgent> {
        let wallet = self.load_wallet().await;

        let req = ConfigureRequest {
            model: self.config.model.clone(),
            instructions: AGENT_INSTRUCTIONS.to_string(),
            network_id: self.config.network_id.clone(),
            wallet_data: wallet.map(WalletCredentials::into_inner),
        };

        let res = self.client.configure(&req).await.map_err(|e| {
            error!("Failed to initialize agent: {}", e);
            e
        })?;

        self.store
            .save(&WalletCredentials::new(res.exported_wallet))
            .await?;

        info!("Agent {} initialized", res.agent_id);

        Ok(InitializedAgent {
            session: Arc::new(RemoteAgentSession {
                client: self.client.clone(),
                agent_id: res.agent_id,
            }),
            config: SessionConfig::new(self.config.thread_id.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuette_core::wallet::FileWalletStore;
    use tempfile::TempDir;

    #[test]
    fn test_configure_request_wire_format() {
        let req = ConfigureRequest {
            model: DEFAULT_MODEL.to_string(),
            instructions: "be nice".to_string(),
            network_id: "base-sepolia".to_string(),
            wallet_data: None,
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4",
                "instructions": "be nice",
                "networkId": "base-sepolia"
            })
        );
    }

    #[test]
    fn test_stream_request_wire_format() {
        let req = StreamRequest {
            thread_id: DEFAULT_THREAD_ID,
            messages: [HumanMessage {
                kind: "human",
                content: "hello",
            }],
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "threadId": "AgentStatuette Chatbot",
                "messages": [{ "type": "human", "content": "hello" }]
            })
        );
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = AgentKitClient::new("http://localhost:4000/");
        assert_eq!(client.url(), "http://localhost:4000");
    }

    #[tokio::test]
    async fn test_initialize_fails_when_runtime_unreachable() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileWalletStore::new(temp_dir.path().join("wallet_data.txt")));
        // Port 9 (discard) is not expected to host an agent runtime
        let provider = AgentKitProvider::new(
            AgentKitClient::new("http://127.0.0.1:9"),
            store.clone(),
            AgentKitConfig::default(),
        );

        let result = provider.initialize().await;

        assert!(result.is_err());
        // Nothing is written when configuration fails
        assert!(store.load().await.unwrap().is_none());
    }
}
