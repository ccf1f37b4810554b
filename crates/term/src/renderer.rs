//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize) is a full redraw; later
//! frames only rewrite the runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows, if known
    front: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen with the cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Raw mode is left even if writing fails.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        let flushed = self.flush_buf();
        terminal::disable_raw_mode()?;
        flushed
    }

    /// Force the next frame to be a full redraw.
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Show `fb`, writing only what differs from the previous frame.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.encode_frame(fb)?;
        self.flush_buf()
    }

    /// Encode `fb` against the previous frame and remember it as shown.
    ///
    /// Returns the bytes [`present`](Self::present) would write. Once the
    /// first frame has been stored, same-sized frames reuse both the output
    /// buffer and the stored frame.
    pub fn encode_frame(&mut self, fb: &FrameBuffer) -> Result<&[u8]> {
        self.buf.clear();
        match self.front.as_mut() {
            Some(front) if front.width() == fb.width() && front.height() == fb.height() => {
                encode_diff_into(front, fb, &mut self.buf)?;
                front.clone_from(fb);
            }
            Some(front) => {
                encode_full_into(fb, &mut self.buf)?;
                front.clone_from(fb);
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                self.front = Some(fb.clone());
            }
        }
        Ok(&self.buf)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

// `SetAttribute` formats through a heap `String`; these are the same SGR codes.
const SGR_BOLD: &str = "\x1b[1m";
const SGR_DIM: &str = "\x1b[2m";

/// Emits style changes only when the style actually differs from the last one.
#[derive(Default)]
struct StyleTracker {
    current: Option<CellStyle>,
}

impl StyleTracker {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        out.queue(ResetColor)?;
        out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            out.queue(Print(SGR_BOLD))?;
        }
        if style.dim {
            out.queue(Print(SGR_DIM))?;
        }
        self.current = Some(style);
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut styles = StyleTracker::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for cell in fb.row(y).unwrap_or_default() {
            styles.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode the runs of cells that differ between two same-sized frames into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut styles = StyleTracker::default();
    let mut wrote = false;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            styles.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        wrote = true;
        Ok(())
    })?;

    if wrote {
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Calls `f(x, y, len)` for each horizontal run of cells that differ, row by row.
///
/// A size mismatch marks every row of `next` dirty.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let same_size = prev.width() == next.width() && prev.height() == next.height();

    for y in 0..next.height() {
        let new_row = next.row(y).unwrap_or_default();
        let old_row = match prev.row(y).filter(|_| same_size) {
            Some(row) => row,
            None => {
                f(0, y, next.width())?;
                continue;
            }
        };

        let mut x = 0;
        while x < new_row.len() {
            if old_row[x] == new_row[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < new_row.len() && old_row[x] != new_row[x] {
                x += 1;
            }
            f(start as u16, y, (x - start) as u16)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        let mut runs = Vec::new();
        for_each_changed_run(prev, next, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        runs
    }

    #[test]
    fn full_redraw_prints_every_cell() {
        let mut fb = FrameBuffer::new(2, 2);
        let style = CellStyle::default();
        fb.put_str(0, 0, "AB", style);
        fb.put_str(0, 1, "CD", style);

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let s = printed(&out);
        assert!(s.contains("AB"));
        assert!(s.contains("CD"));
    }

    #[test]
    fn identical_frames_encode_to_nothing() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "TEST", CellStyle::default());

        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn diff_only_prints_changed_cells() {
        let style = CellStyle::default();
        let mut a = FrameBuffer::new(6, 1);
        a.put_str(0, 0, "KEEP", style);
        let mut b = a.clone();
        b.put_str(4, 0, "XY", style);

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let s = printed(&out);
        assert!(s.contains("XY"));
        assert!(!s.contains("KEEP"));
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(7, 2);
        let mut b = FrameBuffer::new(7, 2);
        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }
        b.put_char(6, 0, 'X', style);
        b.put_char(0, 1, 'X', style);

        assert_eq!(runs(&a, &b), vec![(1, 0, 3), (6, 0, 1), (0, 1, 1)]);
    }

    #[test]
    fn size_change_marks_every_row() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        assert_eq!(runs(&a, &b), vec![(0, 0, 4), (0, 1, 4)]);
    }

    #[test]
    fn encode_frame_diffs_against_the_stored_frame() {
        let mut renderer = TerminalRenderer::new();
        let mut fb = FrameBuffer::new(5, 2);
        fb.put_str(0, 0, "HELLO", CellStyle::default());

        let first = printed(renderer.encode_frame(&fb).unwrap());
        assert!(first.contains("\x1b[2J"));
        assert!(first.contains("HELLO"));

        assert!(renderer.encode_frame(&fb).unwrap().is_empty());

        fb.put_char(4, 1, 'Z', CellStyle::default());
        let third = printed(renderer.encode_frame(&fb).unwrap());
        assert!(third.contains('Z'));
        assert!(!third.contains("HELLO"));
        assert!(!third.contains("\x1b[2J"));

        renderer.invalidate();
        assert!(printed(renderer.encode_frame(&fb).unwrap()).contains("\x1b[2J"));
    }

    #[test]
    fn encode_frame_redraws_fully_on_resize() {
        let mut renderer = TerminalRenderer::new();
        renderer.encode_frame(&FrameBuffer::new(3, 1)).unwrap();

        let mut bigger = FrameBuffer::new(4, 2);
        bigger.put_str(0, 1, "WXYZ", CellStyle::default());
        let out = printed(renderer.encode_frame(&bigger).unwrap());
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("WXYZ"));

        assert!(renderer.encode_frame(&bigger).unwrap().is_empty());
    }

    #[test]
    fn bold_and_dim_emit_sgr_codes() {
        let mut styles = StyleTracker::default();
        let mut out = Vec::new();
        styles
            .apply(&mut out, CellStyle::default().bold().dim())
            .unwrap();
        let s = printed(&out);
        assert!(s.starts_with("\x1b[0m"));
        assert!(s.contains("\x1b[1m"));
        assert!(s.contains("\x1b[2m"));
    }

    #[test]
    fn style_tracker_skips_repeated_styles() {
        let mut styles = StyleTracker::default();
        let mut out = Vec::new();
        styles.apply(&mut out, CellStyle::default()).unwrap();
        let first = out.len();
        assert!(first > 0);

        styles.apply(&mut out, CellStyle::default()).unwrap();
        assert_eq!(out.len(), first);

        styles.apply(&mut out, CellStyle::default().bold()).unwrap();
        assert!(out.len() > first);
    }
}
