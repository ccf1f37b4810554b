//! Scoring module - line clear points, drop points and level speed
//!
//! Line clears pay `LINE_SCORES[n] * level`, levels start at 1 and advance
//! every ten lines, and each level shaves 100ms off the gravity interval down
//! to a 100ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL,
    LINE_SCORES, SOFT_DROP_POINTS,
};

/// Calculate line clear score
/// lines: number of lines cleared at once
/// level: current level (1-based)
///
/// Clears wider than four rows cannot come from a single lock; should one occur
/// it pays as back-to-back four-line clears plus the remainder.
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    let tetrises = lines / 4;
    let rest = (lines % 4) as usize;
    let base = tetrises
        .saturating_mul(LINE_SCORES[4])
        .saturating_add(LINE_SCORES[rest]);
    base.saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level for a running total of cleared lines
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
/// Returns interval based on level, clamped at minimum
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}
