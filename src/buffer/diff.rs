//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! This module implements the core anti-flicker logic:
//! 1. Compare the committed (`current`) and drawn (`next`) buffers
//! 2. Group changed cells into runs: contiguous spans within one row
//! 3. Emit one cursor move per run and one SGR prefix per style change
//! 4. Append a single reset at the end of the frame
//!
//! Output size is proportional to the number of changed cells, and two
//! identical buffers produce no output at all.

use super::{Buffer, Cell};
use crate::ansi::SequenceCache;

/// Statistics about one diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells emitted.
    pub cells_changed: usize,
    /// Number of runs (each starts with one cursor move).
    pub runs: usize,
    /// Number of SGR prefixes emitted.
    pub style_changes: usize,
    /// Bytes appended to the output.
    pub bytes: usize,
}

impl DiffResult {
    /// Check whether the diff produced nothing.
    pub const fn is_empty(&self) -> bool {
        self.cells_changed == 0
    }
}

/// Render the difference between two buffers into `output`.
///
/// With `full` set, every cell of `next` is emitted. Otherwise a cell is
/// emitted when it carries the dirty mark and differs from `current`;
/// cells of `next` without the dirty mark are taken to match `current`,
/// which holds as long as `current` only changes through
/// [`Buffer::copy_from`].
///
/// Each run sets its style explicitly (the prefix starts with a reset), so
/// nothing depends on attributes left over from an earlier run. A single
/// reset is appended after the last run.
///
/// # Arguments
///
/// * `current` - The committed, on-screen buffer
/// * `next` - The buffer to transition to
/// * `full` - Treat every cell as changed
/// * `cache` - Memoized cursor/style/blank sequences
/// * `output` - Buffer to append ANSI sequences to
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    full: bool,
    cache: &mut SequenceCache,
    output: &mut Vec<u8>,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let start_len = output.len();

    let rows = current.rows().zip(next.rows());
    for (y, (current_row, next_row)) in (0u16..).zip(rows) {
        diff_row(y, current_row, next_row, full, cache, output, &mut result);
    }

    if output.len() > start_len {
        output.extend_from_slice(SequenceCache::reset());
    }
    result.bytes = output.len() - start_len;
    result
}

#[inline]
fn changed(full: bool, current: &Cell, next: &Cell) -> bool {
    full || (next.is_dirty() && next != current)
}

/// Diff one row, emitting a run for every maximal span of changed cells.
fn diff_row(
    y: u16,
    current: &[Cell],
    next: &[Cell],
    full: bool,
    cache: &mut SequenceCache,
    output: &mut Vec<u8>,
    result: &mut DiffResult,
) {
    let width = next.len();
    let mut x = 0;

    while x < width {
        if !changed(full, &current[x], &next[x]) {
            x += 1;
            continue;
        }

        // Row widths come from a u16 buffer width.
        let column = u16::try_from(x).unwrap_or(u16::MAX);
        output.extend_from_slice(cache.cursor_to(column, y));
        result.runs += 1;

        let mut run_style = None;
        while x < width && changed(full, &current[x], &next[x]) {
            let cell = &next[x];
            let style = cell.style();
            if run_style != Some(style) {
                output.extend_from_slice(cache.style(style));
                run_style = Some(style);
                result.style_changes += 1;
            }

            if cell.glyph() == ' ' {
                let mut blanks = 1;
                while x + blanks < width
                    && next[x + blanks].glyph() == ' '
                    && next[x + blanks].style() == style
                    && changed(full, &current[x + blanks], &next[x + blanks])
                {
                    blanks += 1;
                }
                let count = u16::try_from(blanks).unwrap_or(u16::MAX);
                output.extend_from_slice(cache.spaces(count));
                result.cells_changed += blanks;
                x += blanks;
            } else {
                let mut utf8 = [0u8; 4];
                output.extend_from_slice(cell.glyph().encode_utf8(&mut utf8).as_bytes());
                result.cells_changed += 1;
                x += 1;
            }
        }
    }
}
