//! Message classifier
//!
//! Decides whether user input switches the interaction mode or is sent to
//! the agent, and rewrites common requests into explicit instructions.

use crate::mode::Mode;

/// Substrings that make the server run an autonomous cycle
pub const AUTONOMOUS_TRIGGERS: [&str; 4] = ["auto", "autonomous", "automatic", "self-running"];

/// Substrings that switch the chat client into autonomous mode
pub const MODE_SWITCH_TRIGGERS: [&str; 2] = ["auto", "autonomous"];

/// Exact input that leaves autonomous mode
pub const STOP_COMMAND: &str = "stop";

const WALLET_DETAILS: &str = "Please show me my wallet address and details from the CDP wallet.";
const FAUCET_REQUEST: &str =
    "Please request test tokens from the faucet for my wallet on the base-sepolia network.";
const SEND_TOKEN: &str = "Please help me send tokens to the specified address using CDP tools.";
const MINT_NFT: &str = "Please create a new NFT using CDP tools and mint it to my wallet.";

/// What the user asked for, as far as the rewrite rules can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    WalletDetails,
    Faucet,
    SendToken,
    MintNft,
    Passthrough,
}

/// Text sent to the agent for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub intent: Intent,
    pub text: String,
}

/// Outcome of classifying one line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Switch to autonomous mode; nothing is sent to the agent
    EnterAutonomous,
    /// Leave autonomous mode; nothing is sent to the agent
    StopAutonomous,
    /// Send this instruction to the agent
    Forward(Instruction),
}

/// Trim and lower-case raw input
pub fn normalize_input(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check if the input should trigger an autonomous cycle on the server
pub fn is_autonomous_trigger(input: &str) -> bool {
    contains_any(input, &AUTONOMOUS_TRIGGERS)
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    let input = input.to_lowercase();
    needles.iter().any(|needle| input.contains(needle))
}

/// Rewrite common requests into richer instructions for the agent.
///
/// Rules are checked in order and the first match wins; anything else is
/// forwarded unmodified.
pub fn rewrite_instruction(input: &str) -> Instruction {
    let (intent, text) = if input.contains("wallet") || input.contains("address") {
        (Intent::WalletDetails, WALLET_DETAILS.to_string())
    } else if input.contains("faucet") {
        (Intent::Faucet, FAUCET_REQUEST.to_string())
    } else if input.contains("send token") {
        (Intent::SendToken, SEND_TOKEN.to_string())
    } else if input.contains("nft") {
        (Intent::MintNft, MINT_NFT.to_string())
    } else {
        (Intent::Passthrough, input.to_string())
    };

    Instruction { intent, text }
}

/// Classify user input given the current mode
pub fn classify(input: &str, mode: Mode) -> Classification {
    let input = normalize_input(input);

    if contains_any(&input, &MODE_SWITCH_TRIGGERS) {
        return Classification::EnterAutonomous;
    }

    if input == STOP_COMMAND && mode.is_auto() {
        return Classification::StopAutonomous;
    }

    Classification::Forward(rewrite_instruction(&input))
}
