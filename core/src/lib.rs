//! Core library for AgentStatuette
//!
//! This crate contains the core business logic, including:
//! - Chat message model and the message classifier
//! - Manual/autonomous mode
//! - The autonomous action catalogue
//! - Wallet credential persistence

pub mod autonomous;
pub mod chat;
pub mod error;
pub mod mode;
pub mod wallet;

pub use error::Error;
pub use mode::Mode;
pub type Result<T> = std::result::Result<T, Error>;
