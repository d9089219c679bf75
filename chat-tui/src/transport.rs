//! HTTP transport to the chat server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use statuette_core::chat::{ChatReply, ChatRequest, ChatResponse};

/// Sends one chat message and returns the responses to display.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<Vec<ChatResponse>>;
}

/// Client for `POST /api/chat`.
#[derive(Clone)]
pub struct HttpChatClient {
    client: Client,
    base_url: String,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, message: &str) -> Result<Vec<ChatResponse>> {
        let resp = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&ChatRequest::new(message))
            .send()
            .await
            .context("Failed to reach chat server")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Chat server returned {}: {}", status, text);
        }

        let reply: ChatReply = resp.json().await.context("Invalid chat reply")?;
        Ok(reply.responses)
    }
}
