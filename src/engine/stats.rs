//! Performance statistics snapshot.

/// A snapshot of engine state and rendering counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerformanceStats {
    /// Frames completed with `end_frame`.
    pub frame_count: u64,
    /// Buffer width in columns (0 when not initialized).
    pub width: u32,
    /// Buffer height in rows (0 when not initialized).
    pub height: u32,
    /// `width * height`.
    pub total_cells: u64,
    /// Approximate memory held by the front and back buffers.
    pub buffer_memory_bytes: usize,
    /// Whether the engine is initialized.
    pub initialized: bool,
    /// Whether a frame is open.
    pub in_frame: bool,
    /// Bytes written to the terminal by `end_frame` over the engine's life.
    pub bytes_written: u64,
    /// Bytes written by the most recent `end_frame`.
    pub last_frame_bytes: usize,
    /// Cells emitted by the most recent `end_frame`.
    pub last_cells_changed: usize,
    /// Runs emitted by the most recent `end_frame`.
    pub last_runs: usize,
    /// Render time of the most recent `end_frame`, in microseconds.
    pub last_render_us: u64,
    /// Smoothed render time, in microseconds.
    pub avg_render_us: u64,
    /// Entries in the sequence cache.
    pub cache_entries: usize,
}
