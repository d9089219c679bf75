//! Autonomous action catalogue

use rand::Rng;
use std::fmt;

/// Seconds between two autonomous cycles
pub const AUTONOMOUS_INTERVAL_SECS: u64 = 30;

/// Network used when `NETWORK_ID` is unset
pub const DEFAULT_NETWORK_ID: &str = "base-sepolia";

/// First instruction of every autonomous cycle
pub const PRELIMINARY_CHECK: &str =
    "First, please check my wallet details and network status to ensure we're on base-sepolia.";

/// An action the agent may pick during an autonomous cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutonomousAction {
    CheckWallet,
    RequestFaucet,
    SendToken,
    MintNft,
    CheckTransactions,
    MonitorNetwork,
}

impl AutonomousAction {
    pub const ALL: [AutonomousAction; 6] = [
        Self::CheckWallet,
        Self::RequestFaucet,
        Self::SendToken,
        Self::MintNft,
        Self::CheckTransactions,
        Self::MonitorNetwork,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::CheckWallet => "Check my wallet balance and details",
            Self::RequestFaucet => "Request test tokens from the faucet if needed",
            Self::SendToken => "Send token to specified address",
            Self::MintNft => "Mint an NFT Collections with generated art",
            Self::CheckTransactions => "Check the status of previous transactions",
            Self::MonitorNetwork => "Monitor gas prices and network status",
        }
    }

    /// Instruction sent to the agent to carry out this action
    pub fn instruction(&self) -> String {
        format!(
            "Let's perform this action: {}. Please execute this task creatively and explain what you're doing.",
            self.description()
        )
    }

    /// Pick one action uniformly at random
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for AutonomousAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Closing message of a successful cycle
pub fn cycle_summary(action: AutonomousAction, interval_secs: u64) -> String {
    format!(
        "Completed autonomous action: {}. Next action in {} seconds...",
        action.description(),
        interval_secs
    )
}

/// The single message a failed cycle produces
pub fn cycle_failure(error: impl fmt::Display, interval_secs: u64) -> String {
    format!(
        "Error in autonomous mode: {}. Will try again in {} seconds...",
        error, interval_secs
    )
}
