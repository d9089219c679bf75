//! Server configuration
//!
//! Read once from the environment at startup.

use std::path::PathBuf;

use agent_runner::{DEFAULT_MODEL, DEFAULT_THREAD_ID};
use statuette_core::autonomous::DEFAULT_NETWORK_ID;
use statuette_core::wallet::DEFAULT_WALLET_FILE;
use tracing::warn;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RUNTIME_URL: &str = "http://localhost:4000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub network_id: String,
    pub agent_runtime_url: String,
    pub agent_model: String,
    pub wallet_data_file: PathBuf,
    pub thread_id: String,
    /// Answer with the in-process echo agent instead of the runtime
    pub echo_mode: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            host: string("HOST", DEFAULT_HOST),
            port,
            network_id: string("NETWORK_ID", DEFAULT_NETWORK_ID),
            agent_runtime_url: string("AGENT_RUNTIME_URL", DEFAULT_RUNTIME_URL),
            agent_model: string("AGENT_MODEL", DEFAULT_MODEL),
            wallet_data_file: PathBuf::from(string("WALLET_DATA_FILE", DEFAULT_WALLET_FILE)),
            thread_id: string("AGENT_THREAD_ID", DEFAULT_THREAD_ID),
            echo_mode: parse_flag(lookup("AGENT_ECHO_MODE"), false),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}
