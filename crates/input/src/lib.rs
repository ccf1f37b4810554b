//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every press is
//! one command; there is no key repeat handling beyond what the terminal sends.

pub mod map;

pub use gravity_tetris_types as types;

pub use map::{handle_key_event, should_quit};
