//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] draws a
//! [`core::GameSnapshot`] into a framebuffer of styled character cells and
//! [`TerminalRenderer`] flushes that framebuffer to the terminal.
//!
//! Board cells are drawn two columns wide to compensate for the usual
//! terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use gravity_tetris_core as core;
pub use gravity_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardFrame, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
