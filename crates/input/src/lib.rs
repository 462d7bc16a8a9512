//! Input mapping: physical keys resolve to a small set of actions.
//!
//! # Invariants
//! - Only fresh key presses produce actions; releases and auto-repeat do not.
//! - The frame loop consumes actions, never raw key events.

pub mod action;
pub mod bindings;

pub use action::Action;
pub use bindings::KeyBindings;

pub fn crate_info() -> &'static str {
    "orrery-input v0.1.0"
}
