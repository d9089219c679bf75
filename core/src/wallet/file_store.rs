//! File-based wallet credential storage
//!
//! Stores the blob verbatim in a single file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::model::WalletCredentials;
use super::repository::WalletCredentialStore;
use crate::{Error, Result};

/// File name used when no path is configured
pub const DEFAULT_WALLET_FILE: &str = "wallet_data.txt";

/// Wallet credential store backed by one file
#[derive(Debug, Clone)]
pub struct FileWalletStore {
    path: PathBuf,
}

impl FileWalletStore {
    /// Create a new FileWalletStore
    ///
    /// The file is not touched until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileWalletStore {
    fn default() -> Self {
        Self::new(DEFAULT_WALLET_FILE)
    }
}

#[async_trait]
impl WalletCredentialStore for FileWalletStore {
    async fn load(&self) -> Result<Option<WalletCredentials>> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!("No wallet data at {:?}", self.path);
            return Ok(None);
        }

        if !tokio::fs::metadata(&self.path).await?.is_file() {
            return Err(Error::WalletStorage(format!(
                "Wallet data path {:?} is not a file",
                self.path
            )));
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(Some(WalletCredentials::new(content)))
    }

    async fn save(&self, credentials: &WalletCredentials) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&self.path, credentials.as_str()).await?;
        debug!("Saved wallet data to {:?}", self.path);
        Ok(())
    }
}
