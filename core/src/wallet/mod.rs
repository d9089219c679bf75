//! Wallet module
//!
//! Persistence of the opaque wallet credential blob that the agent runtime
//! exports after each initialization.

mod file_store;
mod model;
mod repository;

pub use file_store::{FileWalletStore, DEFAULT_WALLET_FILE};
pub use model::WalletCredentials;
pub use repository::WalletCredentialStore;
