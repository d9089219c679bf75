//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing the wallet data file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured wallet location is unusable
    #[error("Wallet storage error: {0}")]
    WalletStorage(String),
}
