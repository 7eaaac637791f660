//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`Control`](crate::types::Control)
//! symbols and front-end commands, and tracks held keys so that terminals
//! without key-release events still produce key-up transitions.

pub mod handler;
pub mod map;

pub use stacker_types as types;

pub use handler::{KeyTracker, KeyTransition};
pub use map::{map_key, should_quit, KeyCommand};
