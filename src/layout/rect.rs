//! Rect: A rectangle primitive in signed drawing coordinates.

/// A rectangle defined by position and size.
///
/// Position may be negative and the rectangle may extend past any buffer;
/// nothing about a `Rect` is validated until it is clipped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: i32,
    /// Y coordinate (row) of the top-left corner.
    pub y: i32,
    /// Width in columns. Non-positive widths are empty.
    pub width: i32,
    /// Height in rows. Non-positive heights are empty.
    pub height: i32,
}

/// The in-bounds part of a [`Rect`], as half-open column and row ranges.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClippedRect {
    /// First column (inclusive).
    pub x0: u16,
    /// Last column (exclusive).
    pub x1: u16,
    /// First row (inclusive).
    pub y0: u16,
    /// Last row (exclusive).
    pub y1: u16,
}

impl ClippedRect {
    /// Columns covered.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.x1 - self.x0
    }

    /// Rows covered.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.y1 - self.y0
    }
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the area (number of cells), zero for empty rectangles.
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.width as u64) * (self.height as u64)
        }
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && (x as i64) < self.right() && y >= self.y && (y as i64) < self.bottom()
    }

    /// Intersect with `[0, width) × [0, height)`.
    ///
    /// Returns `None` when nothing of the rectangle is visible.
    pub fn clip(&self, width: u16, height: u16) -> Option<ClippedRect> {
        if self.is_empty() {
            return None;
        }
        let x0 = i64::from(self.x).clamp(0, i64::from(width));
        let x1 = self.right().clamp(0, i64::from(width));
        let y0 = i64::from(self.y).clamp(0, i64::from(height));
        let y1 = self.bottom().clamp(0, i64::from(height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        // All four values are within 0..=u16::MAX after clamping.
        Some(ClippedRect {
            x0: u16::try_from(x0).ok()?,
            x1: u16::try_from(x1).ok()?,
            y0: u16::try_from(y0).ok()?,
            y1: u16::try_from(y1).ok()?,
        })
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
