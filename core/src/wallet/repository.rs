//! Wallet credential store trait
//!
//! Defines the interface for loading and saving the wallet blob.

use async_trait::async_trait;

use super::model::WalletCredentials;
use crate::Result;

/// Storage for the wallet credential blob
#[async_trait]
pub trait WalletCredentialStore: Send + Sync {
    /// Load the stored credentials, `None` if nothing has been saved yet
    async fn load(&self) -> Result<Option<WalletCredentials>>;

    /// Save credentials, replacing whatever was stored before
    async fn save(&self, credentials: &WalletCredentials) -> Result<()>;
}
