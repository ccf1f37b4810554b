//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! Line clearing and mirroring are gravity-aware: rows always settle towards the
//! edge pieces currently fall to.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, Gravity, InvalidPieceId, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const COLS: usize = BOARD_WIDTH as usize;
const ROWS: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = COLS * ROWS;

/// Row indices removed by one clearing pass, in scan order
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// Board contents as piece ids (0 = empty), indexed `[y][x]`
pub type IdGrid = [[u8; COLS]; ROWS];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from a grid of piece ids, where 0 is empty
    pub fn from_ids(grid: &IdGrid) -> Result<Self, InvalidPieceId> {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                if id != 0 {
                    board.cells[y * COLS + x] = Some(PieceKind::try_from(id)?);
                }
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `shape` fits with its top-left corner at (x, y)
    ///
    /// Every filled cell must land inside the board on an empty cell. This is the
    /// only legality test: moves, rotations, spawns and the ghost all use it.
    pub fn is_valid_move(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .cells()
            .all(|(dx, dy)| self.is_valid(x.saturating_add(dx), y.saturating_add(dy)))
    }

    /// Cells of row `y`, or None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= ROWS {
            return None;
        }
        let start = y * COLS;
        Some(&self.cells[start..start + COLS])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Write `kind` into every filled cell of `shape` placed at (x, y)
    ///
    /// Cells that fall outside the board are skipped. Returns how many cells were written.
    pub fn lock_shape(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        shape
            .cells()
            .filter(|&(dx, dy)| self.set(x.saturating_add(dx), y.saturating_add(dy), Some(kind)))
            .count()
    }

    /// Remove every full row, letting the rest settle towards the fall edge
    ///
    /// With normal gravity rows are scanned bottom to top and the kept rows sink to
    /// the bottom; with anti-gravity rows are scanned top to bottom and rise to the
    /// top. Empty rows refill the spawn side. Uses a two-pointer pass, no allocation.
    pub fn clear_full_rows(&mut self, gravity: Gravity) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut kept = 0;

        for i in 0..ROWS {
            let read_y = settle_order(gravity, i);
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }

            let write_y = settle_order(gravity, kept);
            if write_y != read_y {
                // copy_within handles overlapping ranges safely
                self.cells
                    .copy_within(read_y * COLS..(read_y + 1) * COLS, write_y * COLS);
            }
            kept += 1;
        }

        for i in kept..ROWS {
            let y = settle_order(gravity, i);
            self.cells[y * COLS..(y + 1) * COLS].fill(None);
        }

        cleared
    }

    /// Reverse the row order (row 0 swaps with row 19, and so on)
    pub fn mirror_rows(&mut self) {
        let (top, bottom) = self.cells.split_at_mut(BOARD_SIZE / 2);
        for (upper, lower) in top
            .chunks_exact_mut(COLS)
            .zip(bottom.chunks_exact_mut(COLS).rev())
        {
            upper.swap_with_slice(lower);
        }
    }

    /// Replace the kind of every filled cell with `f(kind)`
    pub fn relabel(&mut self, f: impl Fn(PieceKind) -> PieceKind) {
        for kind in self.cells.iter_mut().flatten() {
            *kind = f(*kind);
        }
    }

    /// Export the board as piece ids
    pub fn write_u8_grid(&self, out: &mut IdGrid) {
        for (dst, src) in out.iter_mut().zip(self.cells.chunks_exact(COLS)) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = crate::types::cell_id(*s);
            }
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// The i-th row visited when settling towards the fall edge
fn settle_order(gravity: Gravity, i: usize) -> usize {
    match gravity {
        Gravity::Normal => ROWS - 1 - i,
        Gravity::Anti => i,
    }
}
