//! Game state module - manages the complete game session
//!
//! This module ties together the board, pieces, RNG and scoring. It owns every
//! piece of mutable game state and is the only place it changes: spawning,
//! movement, rotation, locking, line clears, gravity flips and the drop timer.

use log::{debug, info, trace};

use crate::board::Board;
use crate::pieces::{try_rotate, Piece, Shape};
use crate::rng::SimpleRng;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    rng: SimpleRng,
    gravity: Gravity,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Timestamp of the last automatic drop, in the caller's clock
    last_drop_ms: u64,
    paused: bool,
    game_over: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed and spawn the first piece
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            next: None,
            rng: SimpleRng::new(seed),
            gravity: Gravity::Normal,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
            last_drop_ms: 0,
            paused: false,
            game_over: false,
        };
        state.reset();
        state
    }

    /// Start over: empty board, zeroed counters, normal gravity and a fresh piece pair
    ///
    /// The RNG keeps running, so a restarted game deals new pieces.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.gravity = Gravity::Normal;
        self.drop_interval_ms = BASE_DROP_MS;
        self.last_drop_ms = 0;
        self.paused = false;
        self.game_over = false;
        self.active = None;
        self.next = None;
        info!("new game");
        self.spawn_piece();
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn anti_gravity(&self) -> bool {
        self.gravity.is_anti()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next.map(PieceSnapshot::from);
        out.gravity = self.gravity;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Check whether `shape` fits on the board at (x, y)
    pub fn is_valid_move(&self, shape: &Shape, x: i8, y: i8) -> bool {
        self.board.is_valid_move(shape, x, y)
    }

    /// Create a piece of `kind` at the spawn position for the current gravity
    pub fn create_piece(&self, kind: PieceKind) -> Piece {
        Piece::new(kind, self.gravity)
    }

    /// Create a piece of a uniformly random kind
    pub fn random_piece(&mut self) -> Piece {
        let kind = self.rng.next_piece_kind();
        self.create_piece(kind)
    }

    /// Promote the next piece to active and draw a new next piece
    ///
    /// Returns false, and ends the game, if the new piece does not fit at its
    /// spawn position.
    pub fn spawn_piece(&mut self) -> bool {
        let mut piece = self.next.take().unwrap_or_else(|| self.random_piece());
        self.next = Some(self.random_piece());

        // The next piece was positioned for whatever gravity held when it was drawn.
        piece.recenter(self.gravity);
        self.active = Some(piece);

        if !self.board.is_valid_move(&piece.shape, piece.x, piece.y) {
            self.game_over = true;
            info!("game over: score {} level {} lines {}", self.score, self.level, self.lines);
            return false;
        }

        debug!("spawned {} at ({}, {})", piece.kind.as_str(), piece.x, piece.y);
        true
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let x = active.x.saturating_add(dx);
        let y = active.y.saturating_add(dy);
        if !self.board.is_valid_move(&active.shape, x, y) {
            return false;
        }

        self.active = Some(Piece { x, y, ..active });
        true
    }

    /// Move the active piece one cell in the fall direction, scoring a point on success
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, self.gravity.fall_dy());
        if moved {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
        }
        moved
    }

    /// Drop the active piece as far as it goes in the fall direction and lock it
    ///
    /// Returns the number of cells travelled; each one scores two points.
    pub fn hard_drop(&mut self) -> u32 {
        if self.active.is_none() {
            return 0;
        }

        let dy = self.gravity.fall_dy();
        let mut cells: u32 = 0;
        while self.try_move(0, dy) {
            cells += 1;
        }

        self.score = self.score.saturating_add(calculate_drop_score(cells, true));
        self.lock_piece();
        cells
    }

    /// Rotate the active piece clockwise, kicking sideways if needed
    ///
    /// A rotation with no legal kick leaves the piece untouched and returns false.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let Some((shape, kick)) = try_rotate(&active.shape, active.x, active.y, |s, x, y| {
            board.is_valid_move(s, x, y)
        }) else {
            return false;
        };

        self.active = Some(Piece {
            shape,
            x: active.x.saturating_add(kick),
            ..active
        });
        true
    }

    /// Row the active piece would come to rest on if hard dropped
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let dy = self.gravity.fall_dy();

        let mut y = active.y;
        while self.board.is_valid_move(&active.shape, active.x, y.saturating_add(dy)) {
            y = y.saturating_add(dy);
        }
        Some(y)
    }

    /// Lock the active piece onto the board, clear lines and spawn the next piece
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        // Cells outside the board (only possible after a blocked spawn) are dropped.
        let written = self
            .board
            .lock_shape(&active.shape, active.x, active.y, active.kind);
        debug!(
            "locked {} at ({}, {}), {} cells",
            active.kind.as_str(),
            active.x,
            active.y,
            written
        );

        self.clear_lines();
        self.spawn_piece();
    }

    /// Remove full rows and update score, lines, level and speed
    ///
    /// Returns the number of rows removed. A board without full rows is left as is.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows(self.gravity).len() as u32;
        if cleared == 0 {
            return 0;
        }

        self.score = self.score.saturating_add(calculate_line_score(cleared, self.level));
        self.lines = self.lines.saturating_add(cleared);
        self.level = calculate_level(self.lines);
        self.drop_interval_ms = get_drop_interval_ms(self.level);

        info!(
            "cleared {} line(s): score {} level {} lines {}",
            cleared, self.score, self.level, self.lines
        );
        cleared
    }

    /// Flip gravity
    ///
    /// Mirrors the board top to bottom, swaps J/L and S/Z on the board, and
    /// replaces a J, L, S or Z active piece with a fresh piece of its mirror kind
    /// at the new spawn position. I, O and T pieces stay where they are.
    pub fn toggle_gravity(&mut self) {
        self.gravity = self.gravity.flipped();
        self.board.mirror_rows();
        self.board.relabel(PieceKind::flipped);

        if let Some(active) = self.active {
            let flipped = active.kind.flipped();
            if flipped != active.kind {
                self.active = Some(self.create_piece(flipped));
            }
        }

        debug!("gravity is now {:?}", self.gravity);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advance the drop timer to `now_ms`
    ///
    /// Once more than one drop interval has passed since the last drop, the active
    /// piece moves one cell in the fall direction, or locks if it cannot. Returns
    /// true if a drop was attempted.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.paused || self.game_over {
            return false;
        }

        if now_ms.saturating_sub(self.last_drop_ms) <= u64::from(self.drop_interval_ms) {
            return false;
        }

        if !self.try_move(0, self.gravity.fall_dy()) {
            self.lock_piece();
        }
        self.last_drop_ms = now_ms;
        true
    }

    /// Apply a player command
    ///
    /// Nothing but `Restart` is accepted after game over, and nothing but `Pause`
    /// and `Restart` while paused. Returns whether the command took effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.reset();
                true
            }
            _ if self.game_over => {
                trace!("ignored {:?}: game over", action);
                false
            }
            GameAction::Pause => {
                self.toggle_pause();
                true
            }
            _ if self.paused => {
                trace!("ignored {:?}: paused", action);
                false
            }
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.rotate(),
            GameAction::ToggleGravity => {
                self.toggle_gravity();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
