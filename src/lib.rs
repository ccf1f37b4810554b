//! Gravity-flip Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration
//! tests and benchmarks can write `gravity_tetris::{core, input, term, types}`.

pub use gravity_tetris_core as core;
pub use gravity_tetris_input as input;
pub use gravity_tetris_term as term;
pub use gravity_tetris_types as types;
