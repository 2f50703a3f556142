//! Buffer: A grid of cells representing the terminal screen.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use super::cell::Cell;
use crate::layout::Rect;

/// A grid of cells representing the terminal screen.
///
/// The buffer stores cells in a contiguous `Vec` for cache efficiency.
/// Access is in row-major order: `index = y * width + x`, and
/// `cells.len() == width * height` always holds.
///
/// Writes through [`Buffer::put`] and [`Buffer::fill`] mark the touched
/// cells dirty; the render engine clears the marks when it commits a frame.
#[derive(Clone)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to blank.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::BLANK; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Convert a linear index to (x, y) coordinates.
    #[inline]
    pub fn coords_of(&self, index: usize) -> Option<(u16, u16)> {
        if index < self.cells.len() {
            let x = u16::try_from(index % (self.width as usize)).ok()?;
            let y = u16::try_from(index / (self.width as usize)).ok()?;
            Some((x, y))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y) and mark it dirty.
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.store(idx, cell);
            true
        } else {
            false
        }
    }

    /// Set a cell at signed drawing coordinates.
    ///
    /// Anything outside `[0, width) × [0, height)` is silently clipped.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match (u16::try_from(x), u16::try_from(y)) {
            (Ok(x), Ok(y)) => self.set(x, y, cell),
            _ => false,
        }
    }

    /// Fill a rectangular region with a cell, clipped to the buffer.
    ///
    /// Returns the number of cells written.
    pub fn fill(&mut self, rect: Rect, cell: Cell) -> usize {
        let Some(clip) = rect.clip(self.width, self.height) else {
            return 0;
        };
        let width = self.width as usize;
        for row in clip.y0..clip.y1 {
            let start = row as usize * width;
            for idx in start + clip.x0 as usize..start + clip.x1 as usize {
                self.store(idx, cell);
            }
        }
        clip.width() as usize * clip.height() as usize
    }

    /// Clear a rectangular region to blank cells, clipped to the buffer.
    pub fn clear_rect(&mut self, rect: Rect) -> usize {
        self.fill(rect, Cell::BLANK)
    }

    #[inline]
    fn store(&mut self, idx: usize, mut cell: Cell) {
        cell.mark_dirty();
        self.cells[idx] = cell;
    }

    /// Check whether any cell carries a dirty mark.
    pub fn has_dirty(&self) -> bool {
        self.cells.iter().any(Cell::is_dirty)
    }

    /// Drop every dirty mark.
    pub fn clear_dirty(&mut self) {
        for cell in &mut self.cells {
            cell.mark_clean();
        }
    }

    /// Copy content from another buffer into this one's storage.
    ///
    /// The buffers must have the same dimensions. The storage stays
    /// separate: later writes to `other` never show up here.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Swap the contents of two buffers.
    ///
    /// This is O(1) - just pointer swaps.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.cells, &mut other.cells);
        std::mem::swap(&mut self.width, &mut other.width);
        std::mem::swap(&mut self.height, &mut other.height);
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Collect one row's glyphs into a string. Handy in tests and logs.
    pub fn row_text(&self, y: u16) -> Option<String> {
        let start = self.index_of(0, y)?;
        Some(
            self.cells[start..start + self.width as usize]
                .iter()
                .map(Cell::glyph)
                .collect(),
        )
    }

    /// Get memory usage in bytes (approximate).
    pub fn memory_usage(&self) -> usize {
        self.cells.capacity() * std::mem::size_of::<Cell>() + std::mem::size_of::<Self>()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("memory_bytes", &self.memory_usage())
            .finish()
    }
}
