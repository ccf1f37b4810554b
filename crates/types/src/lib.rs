//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the core engine, the terminal
//! renderer and the input mapping alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Gravity
//!
//! Pieces fall down (towards row 19) in normal gravity and up (towards row 0)
//! in anti-gravity. New pieces always spawn on the edge opposite to the one they
//! fall towards.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default frame/poll interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest possible gravity |
//!
//! # Examples
//!
//! ```
//! use gravity_tetris_types::{Gravity, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::try_from(2).unwrap();
//! assert_eq!(kind, PieceKind::J);
//! assert_eq!(kind.flipped(), PieceKind::L);
//!
//! assert_eq!(Gravity::Normal.fall_dy(), 1);
//! assert_eq!(Gravity::Normal.flipped(), Gravity::Anti);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use thiserror::Error;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default frame/poll interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level gained
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cell for a manual soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Line clear scoring table
///
/// Base points for clearing N lines at once, multiplied by the current level:
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Horizontal offsets tried, in order, after a rotation.
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// The seven piece kinds, numbered 1-7 as in the piece catalog
///
/// - **I** (1): Cyan, straight bar
/// - **J** (2): Blue (mirror of L)
/// - **L** (3): Orange (mirror of J)
/// - **O** (4): Yellow, 2x2 square
/// - **S** (5): Green (mirror of Z)
/// - **T** (6): Purple
/// - **Z** (7): Red (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    T = 6,
    Z = 7,
}

/// Error returned when a numeric id does not name a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid piece id {0}, expected 1..=7")]
pub struct InvalidPieceId(pub u8);

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Catalog identifier (1-7).
    pub fn id(self) -> u8 {
        self as u8
    }

    /// The kind this piece becomes when gravity is flipped.
    ///
    /// J and L swap, S and Z swap; I, O and T are their own mirror image.
    ///
    /// ```
    /// use gravity_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::S.flipped(), PieceKind::Z);
    /// assert_eq!(PieceKind::T.flipped(), PieceKind::T);
    /// for kind in PieceKind::ALL {
    ///     assert_eq!(kind.flipped().flipped(), kind);
    /// }
    /// ```
    pub fn flipped(self) -> Self {
        match self {
            PieceKind::J => PieceKind::L,
            PieceKind::L => PieceKind::J,
            PieceKind::S => PieceKind::Z,
            PieceKind::Z => PieceKind::S,
            other => other,
        }
    }

    /// Display color as `[r, g, b]`.
    pub fn color(self) -> [u8; 3] {
        match self {
            PieceKind::I => [0x00, 0xf0, 0xf0],
            PieceKind::J => [0x00, 0x00, 0xf0],
            PieceKind::L => [0xf0, 0xa0, 0x00],
            PieceKind::O => [0xf0, 0xf0, 0x00],
            PieceKind::S => [0x00, 0xf0, 0x00],
            PieceKind::T => [0xa0, 0x00, 0xf0],
            PieceKind::Z => [0xf0, 0x00, 0x00],
        }
    }

    /// Single uppercase letter for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

impl TryFrom<u8> for PieceKind {
    type Error = InvalidPieceId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(PieceKind::I),
            2 => Ok(PieceKind::J),
            3 => Ok(PieceKind::L),
            4 => Ok(PieceKind::O),
            5 => Ok(PieceKind::S),
            6 => Ok(PieceKind::T),
            7 => Ok(PieceKind::Z),
            other => Err(InvalidPieceId(other)),
        }
    }
}

/// Direction pieces fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gravity {
    /// Pieces fall towards the bottom row and spawn at the top.
    #[default]
    Normal,
    /// Pieces fall towards the top row and spawn at the bottom.
    Anti,
}

impl Gravity {
    /// Vertical step of one cell in the fall direction.
    pub fn fall_dy(self) -> i8 {
        match self {
            Gravity::Normal => 1,
            Gravity::Anti => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Gravity::Normal => Gravity::Anti,
            Gravity::Anti => Gravity::Normal,
        }
    }

    pub fn is_anti(self) -> bool {
        self == Gravity::Anti
    }

    /// Mode indicator text shown to the player.
    pub fn label(self) -> &'static str {
        match self {
            Gravity::Normal => "GRAVITY MODE",
            Gravity::Anti => "ANTI-GRAVITY MODE",
        }
    }
}

/// Commands that can be applied to a running game
///
/// Every input source is translated into these before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell in the fall direction (+1 point)
    SoftDrop,
    /// Drop piece as far as it goes and lock it (+2 points per cell)
    HardDrop,
    /// Rotate piece 90° clockwise, with horizontal wall kicks
    Rotate,
    /// Flip gravity: mirror the board and swap J/L and S/Z
    ToggleGravity,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Restart,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Numeric form of a cell: 0 for empty, otherwise the piece id.
pub fn cell_id(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_ids_match_catalog_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i + 1);
            assert_eq!(PieceKind::try_from(kind.id()), Ok(*kind));
        }
    }

    #[test]
    fn invalid_piece_ids_are_rejected() {
        assert_eq!(PieceKind::try_from(0), Err(InvalidPieceId(0)));
        assert_eq!(PieceKind::try_from(8), Err(InvalidPieceId(8)));
        assert_eq!(
            InvalidPieceId(9).to_string(),
            "invalid piece id 9, expected 1..=7"
        );
    }

    #[test]
    fn flip_table_swaps_mirror_pairs_only() {
        assert_eq!(PieceKind::J.flipped(), PieceKind::L);
        assert_eq!(PieceKind::L.flipped(), PieceKind::J);
        assert_eq!(PieceKind::S.flipped(), PieceKind::Z);
        assert_eq!(PieceKind::Z.flipped(), PieceKind::S);
        assert_eq!(PieceKind::I.flipped(), PieceKind::I);
        assert_eq!(PieceKind::O.flipped(), PieceKind::O);
        assert_eq!(PieceKind::T.flipped(), PieceKind::T);
    }

    #[test]
    fn gravity_fall_direction() {
        assert_eq!(Gravity::default(), Gravity::Normal);
        assert_eq!(Gravity::Normal.fall_dy(), 1);
        assert_eq!(Gravity::Anti.fall_dy(), -1);
        assert!(Gravity::Anti.is_anti());
        assert_eq!(Gravity::Anti.flipped(), Gravity::Normal);
    }

    #[test]
    fn cell_id_encoding() {
        assert_eq!(cell_id(None), 0);
        assert_eq!(cell_id(Some(PieceKind::Z)), 7);
    }

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_INTERVAL_STEP_MS, 100);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(LINES_PER_LEVEL, 10);
    }
}
