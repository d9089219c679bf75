//! Wallet credential model

use std::fmt;

/// Opaque wallet data produced and consumed by the agent runtime.
///
/// The contents are never inspected here.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletCredentials(String);

impl WalletCredentials {
    pub fn new(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Credentials end up in logs through `{:?}` on request structs
impl fmt::Debug for WalletCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletCredentials({} bytes)", self.0.len())
    }
}
