//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has no dependencies on terminal or input handling; the only outside
//! effect is `log` output, which is silent unless the binary installs a logger.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection, line clearing and mirroring
//! - [`game_state`]: Complete game session: active and next piece, gravity, scoring, timing
//! - [`pieces`]: Tetromino templates, clockwise rotation and wall kicks
//! - [`rng`]: Seeded uniform piece selection
//! - [`scoring`]: Line clear and drop points, level and speed curve
//! - [`snapshot`]: Read-only view handed to renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece is drawn independently from the seven kinds
//! - **Simple rotation**: one clockwise turn, then horizontal kicks of 0, -1, +1, -2, +2
//! - **Immediate lock**: a piece locks as soon as a drop fails
//! - **Gravity flip**: pieces can fall up; flipping mirrors the board and swaps J/L and S/Z
//!
//! # Example
//!
//! ```
//! use gravity_tetris_core::GameState;
//! use gravity_tetris_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards points
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! [`GameState::tick`](game_state::GameState::tick) takes a millisecond
//! timestamp from any monotonic clock. The piece falls one row whenever more
//! than the current drop interval (1000ms at level 1, 100ms less per level,
//! never under 100ms) has passed since the previous drop.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use gravity_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows, IdGrid};
pub use game_state::GameState;
pub use pieces::{get_shape, spawn_position, try_rotate, Piece, Shape};
pub use rng::SimpleRng;
pub use scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
};
pub use snapshot::{GameSnapshot, PieceSnapshot};
