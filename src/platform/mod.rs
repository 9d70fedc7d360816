//! Platform abstraction layer
//!
//! Handles browser/native differences for input events. The DOM listeners
//! live in the binary; this module only maps key codes to game actions.

pub mod input;

pub use input::{Action, InputBridge, InputState, SubscriptionId};
