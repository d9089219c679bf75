//! Chat module
//!
//! Message types exchanged between the UI and the server, and the
//! classifier that turns raw user input into agent instructions.

mod classifier;
mod model;

pub use classifier::{
    classify, is_autonomous_trigger, normalize_input, rewrite_instruction, Classification,
    Instruction, Intent, AUTONOMOUS_TRIGGERS, MODE_SWITCH_TRIGGERS, STOP_COMMAND,
};
pub use model::*;
