//! Autonomous module
//!
//! The fixed catalogue of actions the agent performs on its own, plus the
//! instruction and notice texts of one autonomous cycle.

mod action;

pub use action::{
    cycle_failure, cycle_summary, AutonomousAction, AUTONOMOUS_INTERVAL_SECS, DEFAULT_NETWORK_ID,
    PRELIMINARY_CHECK,
};
