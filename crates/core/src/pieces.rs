//! Pieces module - piece catalog, shape matrices and rotation
//!
//! Every piece kind has one template shape. Rotation is a plain 90° clockwise
//! matrix turn followed by a horizontal wall-kick search, so there are no
//! per-rotation tables: an R×C shape becomes a C×R shape.

use crate::types::{Gravity, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, KICK_OFFSETS};

/// Largest width or height a shape can have
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single filled cell relative to the shape's top-left corner, as (dx, dy)
pub type CellOffset = (i8, i8);

/// A rectangular occupancy matrix of at most 4x4 cells
///
/// Stored inline so pieces stay `Copy` and rotation never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Indexed `[row][col]`; cells outside `height`×`width` are always false
    filled: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of catalog values, where any non-zero value is filled.
    ///
    /// ```
    /// use gravity_tetris_core::Shape;
    ///
    /// let t = Shape::from_rows([[0, 6, 0], [6, 6, 6]]);
    /// assert_eq!((t.width(), t.height()), (3, 2));
    /// assert!(t.is_filled(0, 1));
    /// assert!(!t.is_filled(0, 0));
    /// ```
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W >= 1 && W <= MAX_SHAPE_SIZE, "shape width must be 1..=4");
        assert!(H >= 1 && H <= MAX_SHAPE_SIZE, "shape height must be 1..=4");

        let mut filled = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < H {
            let mut c = 0;
            while c < W {
                filled[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }

        Self {
            width: W as u8,
            height: H as u8,
            filled,
        }
    }

    /// Number of columns (the length of the first row)
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at (row, col) is filled; false outside the shape
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height as usize && col < self.width as usize && self.filled[row][col]
    }

    /// Offsets (dx, dy) of every filled cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        (0..self.height as usize).flat_map(move |row| {
            (0..self.width as usize)
                .filter(move |&col| self.filled[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// The shape turned 90° clockwise
    ///
    /// Row `c` of the result is column `c` of the original read bottom to top.
    pub fn rotated_cw(&self) -> Shape {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut filled = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (c, row) in filled.iter_mut().enumerate().take(w) {
            for (r, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.filled[h - 1 - r][c];
            }
        }
        Shape {
            width: self.height,
            height: self.width,
            filled,
        }
    }

    /// Matrix form with filled cells set to `kind`'s id and empty cells to 0
    ///
    /// ```
    /// use gravity_tetris_core::{get_shape, types::PieceKind};
    ///
    /// let t = get_shape(PieceKind::T).rotated_cw();
    /// assert_eq!(t.to_ids(PieceKind::T), vec![vec![6, 0], vec![6, 6], vec![6, 0]]);
    /// ```
    pub fn to_ids(&self, kind: PieceKind) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|row| {
                (0..self.width as usize)
                    .map(|col| if self.filled[row][col] { kind.id() } else { 0 })
                    .collect()
            })
            .collect()
    }
}

const I_SHAPE: Shape = Shape::from_rows([[1, 1, 1, 1]]);
const J_SHAPE: Shape = Shape::from_rows([[2, 0, 0], [2, 2, 2]]);
const L_SHAPE: Shape = Shape::from_rows([[0, 0, 3], [3, 3, 3]]);
const O_SHAPE: Shape = Shape::from_rows([[4, 4], [4, 4]]);
const S_SHAPE: Shape = Shape::from_rows([[0, 5, 5], [5, 5, 0]]);
const T_SHAPE: Shape = Shape::from_rows([[0, 6, 0], [6, 6, 6]]);
const Z_SHAPE: Shape = Shape::from_rows([[7, 7, 0], [0, 7, 7]]);

/// Get the template shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Spawn offset for a shape: centered horizontally, on the edge opposite the fall direction
pub fn spawn_position(shape: &Shape, gravity: Gravity) -> (i8, i8) {
    let x = (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8;
    let y = match gravity {
        Gravity::Normal => 0,
        Gravity::Anti => BOARD_HEIGHT as i8 - shape.height() as i8,
    };
    (x, y)
}

/// A piece: its kind, current shape and the board offset of the shape's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece with its template shape at the spawn position for `gravity`
    pub fn new(kind: PieceKind, gravity: Gravity) -> Self {
        let shape = get_shape(kind);
        let (x, y) = spawn_position(&shape, gravity);
        Self { kind, shape, x, y }
    }

    /// Move the piece back to the spawn position for its current shape
    pub fn recenter(&mut self, gravity: Gravity) {
        let (x, y) = spawn_position(&self.shape, gravity);
        self.x = x;
        self.y = y;
    }

    /// Absolute board positions of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }
}

/// Rotate a shape clockwise and search the kick offsets for a legal placement
///
/// `is_valid(shape, x, y)` decides legality. Returns the rotated shape and the
/// chosen horizontal kick, or `None` when every offset is blocked.
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    is_valid: impl Fn(&Shape, i8, i8) -> bool,
) -> Option<(Shape, i8)> {
    let rotated = shape.rotated_cw();
    KICK_OFFSETS
        .iter()
        .copied()
        .find(|&kick| is_valid(&rotated, x.saturating_add(kick), y))
        .map(|kick| (rotated, kick))
}
