//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
const KILL_ZONE: CellStyle = CellStyle::new(Rgb::new(230, 40, 40), BLACK).bold();
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame lands in a viewport, border included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Board frame position for a viewport: centered, clamped to the top-left corner
    pub fn board_frame(&self, viewport: Viewport) -> BoardFrame {
        let width = BOARD_WIDTH as u16 * self.cell_w + 2;
        let height = BOARD_HEIGHT as u16 * self.cell_h + 2;
        BoardFrame {
            x: viewport.width.saturating_sub(width) / 2,
            y: viewport.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.board_frame(viewport);
        fb.draw_box(frame.x, frame.y, frame.width, frame.height, BORDER);
        self.draw_kill_zone(fb, frame, snap);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                let (x, y) = (x as i8, y as i8);
                match PieceKind::try_from(id) {
                    Ok(kind) => self.draw_block(fb, frame, x, y, kind),
                    Err(_) => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
                        self.fill_cell(fb, frame, x, y, '·', dot);
                    }
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
            for (x, y) in active.cells_at(ghost_y) {
                self.fill_cell(fb, frame, x, y, '░', ghost);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells_at(active.y) {
                self.draw_block(fb, frame, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, 0, "GAME OVER");
            self.draw_final_score(fb, frame, snap.score);
        } else if snap.paused {
            self.draw_overlay_text(fb, frame, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Paint the frame edge new pieces spawn against in red.
    fn draw_kill_zone(&self, fb: &mut FrameBuffer, frame: BoardFrame, snap: &GameSnapshot) {
        let y = if snap.anti_gravity() {
            frame.y + frame.height - 1
        } else {
            frame.y
        };
        for x in frame.x + 1..frame.x + frame.width - 1 {
            fb.put_char(x, y, '━', KILL_ZONE);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(Rgb::from(kind.color()), WELL_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    /// Fill one board cell; cells outside the well are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: BoardFrame,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if !(0..BOARD_WIDTH as i8).contains(&x) || !(0..BOARD_HEIGHT as i8).contains(&y) {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: BoardFrame,
    ) {
        let panel_x = frame.x.saturating_add(frame.width).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let mut y = frame.y;
        for (label, value) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_u32(panel_x, y + 1, value, VALUE);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", LABEL);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next);
        }
        y = y.saturating_add(5);

        let mode = if snap.anti_gravity() {
            CellStyle::new(Rgb::new(120, 200, 255), BLACK).bold()
        } else {
            LABEL
        };
        fb.put_str(panel_x, y, snap.gravity.label(), mode);
    }

    /// Draw a piece's shape at its own origin, two columns per cell.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceSnapshot) {
        let style = CellStyle::new(Rgb::from(piece.kind.color()), BLACK).bold();
        for (dx, dy) in piece.shape.cells() {
            let px = x + dx as u16 * 2;
            fb.fill_rect(px, y + dy as u16, 2, 1, '█', style);
        }
    }

    /// Centered text on the middle row of the board frame, `dy` rows down.
    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: BoardFrame, dy: u16, text: &str) {
        let y = frame.y.saturating_add(frame.height / 2).saturating_add(dy);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.width.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, OVERLAY);
    }

    fn draw_final_score(&self, fb: &mut FrameBuffer, frame: BoardFrame, score: u32) {
        const PREFIX: &str = "SCORE ";
        let text_w = PREFIX.len() as u16 + digit_count(score);
        let y = frame.y.saturating_add(frame.height / 2).saturating_add(2);
        let x = frame.x.saturating_add(frame.width.saturating_sub(text_w) / 2);
        fb.put_str(x, y, PREFIX, OVERLAY);
        fb.put_u32(x + PREFIX.len() as u16, y, score, OVERLAY);
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::Gravity;

    const VIEWPORT: Viewport = Viewport {
        width: 80,
        height: 24,
    };

    fn text(fb: &FrameBuffer) -> Vec<String> {
        (0..fb.height())
            .map(|y| fb.row(y).unwrap_or_default().iter().map(|c| c.ch).collect())
            .collect()
    }

    fn contains(fb: &FrameBuffer, needle: &str) -> bool {
        text(fb).iter().any(|row| row.contains(needle))
    }

    #[test]
    fn board_frame_is_centered() {
        let frame = GameView::default().board_frame(VIEWPORT);
        assert_eq!(
            frame,
            BoardFrame {
                x: 29,
                y: 1,
                width: 22,
                height: 22
            }
        );
    }

    #[test]
    fn kill_zone_follows_gravity() {
        let view = GameView::default();
        let mut snap = GameSnapshot::default();

        let fb = view.render(&snap, VIEWPORT);
        assert_eq!(fb.get(30, 1), Some(KILL_ZONE.cell('━')));
        assert_eq!(fb.get(30, 22), Some(BORDER.cell('─')));

        snap.gravity = Gravity::Anti;
        let fb = view.render(&snap, VIEWPORT);
        assert_eq!(fb.get(30, 1), Some(BORDER.cell('─')));
        assert_eq!(fb.get(30, 22), Some(KILL_ZONE.cell('━')));
    }

    #[test]
    fn locked_cells_use_piece_colors() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = PieceKind::O.id();

        let fb = GameView::default().render(&snap, VIEWPORT);
        for x in [30, 31] {
            let cell = fb.get(x, 21).unwrap_or_default();
            assert_eq!(cell.ch, '█');
            assert_eq!(cell.style.fg, Rgb::from(PieceKind::O.color()));
        }
        assert_eq!(fb.get(32, 21).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn ghost_and_active_piece_are_drawn() {
        let snap = GameState::new(3).snapshot();
        let fb = GameView::default().render(&snap, VIEWPORT);

        let ghost_cells = fb.cells().iter().filter(|c| c.ch == '░').count();
        assert_eq!(ghost_cells, 8);

        let active = snap.active.unwrap();
        let color = Rgb::from(active.kind.color());
        let active_cells = fb
            .cells()
            .iter()
            .filter(|c| c.ch == '█' && c.style.fg == color && c.style.bg == WELL_BG)
            .count();
        assert_eq!(active_cells, 8);
    }

    #[test]
    fn side_panel_shows_stats_and_mode() {
        let mut snap = GameSnapshot::default();
        snap.score = 1234;
        snap.lines = 12;
        snap.level = 2;

        let fb = GameView::default().render(&snap, VIEWPORT);
        assert!(contains(&fb, "SCORE"));
        assert!(contains(&fb, "1234"));
        assert!(contains(&fb, "NEXT"));
        assert!(contains(&fb, "GRAVITY MODE"));
        assert!(!contains(&fb, "ANTI-GRAVITY MODE"));

        snap.gravity = Gravity::Anti;
        let fb = GameView::default().render(&snap, VIEWPORT);
        assert!(contains(&fb, "ANTI-GRAVITY MODE"));
    }

    #[test]
    fn overlays() {
        let view = GameView::default();
        let mut snap = GameSnapshot::default();
        assert!(!contains(&view.render(&snap, VIEWPORT), "PAUSED"));

        snap.paused = true;
        assert!(contains(&view.render(&snap, VIEWPORT), "PAUSED"));

        snap.paused = false;
        snap.game_over = true;
        snap.score = 907;
        let fb = view.render(&snap, VIEWPORT);
        assert!(contains(&fb, "GAME OVER"));
        assert!(contains(&fb, "SCORE 907"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameState::new(9).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(10, 5));
        assert_eq!((fb.width(), fb.height()), (10, 5));
    }

    #[test]
    fn digit_counts() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(u32::MAX), 10);
    }
}
