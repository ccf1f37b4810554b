//! Read-only view of a game for renderers and status displays.

use crate::board::IdGrid;
use crate::pieces::{Piece, Shape};
use crate::types::{Gravity, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl PieceSnapshot {
    /// Absolute board positions of the filled cells, with the shape moved to row `y`
    pub fn cells_at(&self, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x.saturating_add(dx), y.saturating_add(dy)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: IdGrid,
    pub active: Option<PieceSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceSnapshot>,
    pub gravity: Gravity,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn anti_gravity(&self) -> bool {
        self.gravity.is_anti()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            gravity: Gravity::Normal,
            paused: false,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
        }
    }
}
