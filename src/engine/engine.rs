//! Engine: the frame lifecycle around the double buffer.
//!
//! ```text
//! Uninitialized ──initialize──▶ Idle ──begin_frame──▶ InFrame
//!                                ▲                      │
//!                                └──────end_frame───────┘
//!                  Idle / InFrame ──cleanup──▶ Cleaned ──initialize──▶ Idle
//! ```
//!
//! Drawing calls only touch the back buffer. `end_frame` diffs it against
//! the front buffer, writes the result in one call, then copies back into
//! front. The back buffer is never reset between frames: whatever a caller
//! does not repaint stays as it was last drawn.

use super::{EngineConfig, EngineError, PerformanceStats};
use crate::ansi::{decode_with, encode, SequenceCache};
use crate::buffer::diff::{render_diff, DiffResult};
use crate::buffer::{Buffer, Cell, Style};
use crate::draw::{self, BoxVariant};
use crate::layout::Rect;
use crate::terminal::{Backend, CrosstermBackend};
use std::cell::Cell as NotSync;
use std::fmt;
use std::marker::PhantomData;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Lifecycle phase of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Created, `initialize` not called yet.
    Uninitialized,
    /// Initialized, no frame open.
    Idle,
    /// Between `begin_frame` and `end_frame`.
    InFrame,
    /// `cleanup` ran; `initialize` may be called again.
    Cleaned,
}

impl Phase {
    /// Whether buffers are allocated in this phase.
    pub const fn is_initialized(self) -> bool {
        matches!(self, Self::Idle | Self::InFrame)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Idle => "idle",
            Self::InFrame => "in a frame",
            Self::Cleaned => "cleaned up",
        })
    }
}

/// Front (committed) and back (being drawn) buffers, always the same size
/// and never sharing storage.
struct Surfaces {
    front: Buffer,
    back: Buffer,
}

impl Surfaces {
    fn new(width: u16, height: u16) -> Self {
        Self {
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
        }
    }

    fn size(&self) -> (u16, u16) {
        (self.back.width(), self.back.height())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RenderCounters {
    bytes_written: u64,
    last: DiffResult,
    last_frame_bytes: usize,
    last_render_us: u64,
    avg_render_us: u64,
}

/// The differential render engine.
///
/// One engine drives one terminal. It is `Send` but not `Sync`: a single
/// owner runs the frame cycle, and there is no internal locking.
///
/// # Example
///
/// ```
/// use cellframe::{Engine, EngineConfig, TestBackend};
///
/// let mut engine = Engine::new(TestBackend::new(40, 10), EngineConfig::default());
/// engine.initialize()?;
/// engine.begin_frame()?;
/// engine.write_at(0, 0, "\x1b[1mTasks\x1b[0m (3 open)")?;
/// engine.end_frame()?;
/// assert_eq!(engine.performance_stats().frame_count, 1);
/// # Ok::<(), cellframe::EngineError>(())
/// ```
pub struct Engine<B: Backend = CrosstermBackend> {
    backend: B,
    config: EngineConfig,
    phase: Phase,
    surfaces: Option<Surfaces>,
    force_full_redraw: bool,
    frame_count: u64,
    cache: SequenceCache,
    /// Pre-allocated frame output.
    output: Vec<u8>,
    counters: RenderCounters,
    _single_owner: PhantomData<NotSync<()>>,
}

impl Engine<CrosstermBackend> {
    /// Create an engine for standard output, configured from the
    /// environment.
    pub fn stdout() -> Self {
        Self::new(CrosstermBackend::new(), EngineConfig::from_env())
    }
}

impl<B: Backend> Engine<B> {
    /// Create an uninitialized engine.
    pub fn new(backend: B, config: EngineConfig) -> Self {
        let cache = SequenceCache::new(config.cache_capacity);
        let output = Vec::with_capacity(config.output_capacity);
        Self {
            backend,
            config,
            phase: Phase::Uninitialized,
            surfaces: None,
            force_full_redraw: false,
            frame_count: 0,
            cache,
            output,
            counters: RenderCounters::default(),
            _single_owner: PhantomData,
        }
    }

    /// Query the terminal, allocate both buffers and prepare the screen.
    ///
    /// The first frame after `initialize` repaints every cell. Returns the
    /// buffer size, which is never zero in either dimension.
    ///
    /// # Errors
    ///
    /// [`EngineError::AlreadyInitialized`] if called again before
    /// [`Engine::cleanup`]; [`EngineError::Io`] if terminal setup fails.
    pub fn initialize(&mut self) -> Result<(u32, u32), EngineError> {
        if self.phase.is_initialized() {
            return Err(EngineError::AlreadyInitialized);
        }

        let (width, height) = self.query_size();
        self.backend.enter(self.config.raw_mode)?;

        let mut setup = Vec::new();
        if self.config.alternate_screen {
            setup.extend_from_slice(encode::ALT_SCREEN_ENTER);
        }
        if self.config.hide_cursor {
            setup.extend_from_slice(encode::CURSOR_HIDE);
        }
        if !setup.is_empty() {
            if let Err(e) = self.backend.write_frame(&setup) {
                if let Err(leave) = self.backend.leave(self.config.raw_mode) {
                    warn!(target: "render.engine", error = %leave, "initialize_leave_failed");
                }
                return Err(e.into());
            }
        }

        self.surfaces = Some(Surfaces::new(width, height));
        self.force_full_redraw = true;
        self.frame_count = 0;
        self.counters = RenderCounters::default();
        self.phase = Phase::Idle;

        debug!(target: "render.engine", width, height, "engine_initialized");
        Ok((u32::from(width), u32::from(height)))
    }

    /// Open a frame.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] unless the engine is idle: before
    /// `initialize`, after `cleanup`, or with a frame already open.
    pub fn begin_frame(&mut self) -> Result<(), EngineError> {
        if self.phase != Phase::Idle {
            return Err(self.invalid("begin_frame"));
        }
        self.phase = Phase::InFrame;
        Ok(())
    }

    /// Write pre-styled text starting at `(x, y)`.
    ///
    /// `text` may embed SGR sequences; the style starts from the default on
    /// every call. Each decoded character takes one column. Characters
    /// outside the buffer are clipped.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] outside a frame.
    pub fn write_at(&mut self, x: i32, y: i32, text: &str) -> Result<(), EngineError> {
        let back = self.back_mut("write_at")?;
        if u16::try_from(y).map_or(true, |row| row >= back.height()) {
            return Ok(());
        }

        let mut column = i64::from(x);
        let right = i64::from(back.width());
        decode_with(text, |ch, style| {
            if (0..right).contains(&column) {
                if let Ok(col) = i32::try_from(column) {
                    back.put(col, y, Cell::styled(ch, style));
                }
            }
            column += 1;
        });
        Ok(())
    }

    /// Blank the `w` × `h` rectangle at `(x, y)`, clipped to the buffer.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] outside a frame.
    pub fn clear(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<(), EngineError> {
        let back = self.back_mut("clear")?;
        back.clear_rect(Rect::new(x, y, w, h));
        Ok(())
    }

    /// Blank row `y`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] outside a frame.
    pub fn clear_line(&mut self, y: i32) -> Result<(), EngineError> {
        let back = self.back_mut("clear_line")?;
        let width = i32::from(back.width());
        back.clear_rect(Rect::new(0, y, width, 1));
        Ok(())
    }

    /// Draw a box outline through [`Engine::write_at`] only.
    ///
    /// Boxes narrower or shorter than 2 draw nothing.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] outside a frame.
    pub fn draw_box(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        variant: BoxVariant,
        style: Option<Style>,
    ) -> Result<(), EngineError> {
        self.require_frame("draw_box")?;
        draw::draw_box(self, Rect::new(x, y, w, h), variant, style)
    }

    /// Make the next `end_frame` repaint every cell. Allowed in any phase.
    pub fn request_clear(&mut self) {
        self.force_full_redraw = true;
    }

    /// Close the frame: diff, write once, commit.
    ///
    /// Nothing is written when nothing changed. If the write fails the
    /// frame is dropped, the engine returns to idle and the next frame
    /// repaints everything.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] outside a frame; [`EngineError::Io`]
    /// if the write fails.
    pub fn end_frame(&mut self) -> Result<(), EngineError> {
        self.require_frame("end_frame")?;
        let Some(surfaces) = self.surfaces.as_mut() else {
            return Err(EngineError::NotInitialized);
        };
        let start = Instant::now();

        self.output.clear();
        if self.config.synchronized_output {
            self.output.extend_from_slice(encode::SYNC_BEGIN);
        }
        let diff = render_diff(
            &surfaces.front,
            &surfaces.back,
            self.force_full_redraw,
            &mut self.cache,
            &mut self.output,
        );
        if diff.bytes == 0 {
            self.output.clear();
        } else if self.config.synchronized_output {
            self.output.extend_from_slice(encode::SYNC_END);
        }

        if !self.output.is_empty() {
            if let Err(e) = self.backend.write_frame(&self.output) {
                warn!(target: "render.engine", error = %e, frame = self.frame_count + 1, "frame_write_failed");
                self.force_full_redraw = true;
                self.phase = Phase::Idle;
                return Err(e.into());
            }
        }

        let Surfaces { front, back } = surfaces;
        back.clear_dirty();
        front.copy_from(back);

        self.frame_count += 1;
        self.force_full_redraw = false;
        self.phase = Phase::Idle;
        self.record_frame(diff, start);
        Ok(())
    }

    /// Re-query the terminal size and reallocate both buffers if it
    /// changed. Content is not preserved; the next frame repaints fully.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidState`] while a frame is open;
    /// [`EngineError::NotInitialized`] before `initialize` or after
    /// `cleanup`.
    pub fn update_dimensions(&mut self) -> Result<(u32, u32), EngineError> {
        match self.phase {
            Phase::Idle => {}
            Phase::InFrame => return Err(self.invalid("update_dimensions")),
            Phase::Uninitialized | Phase::Cleaned => return Err(EngineError::NotInitialized),
        }

        let (width, height) = self.query_size();
        let surfaces = self.surfaces.as_mut().ok_or(EngineError::NotInitialized)?;
        let old = surfaces.size();
        if old != (width, height) {
            *surfaces = Surfaces::new(width, height);
            self.force_full_redraw = true;
            debug!(
                target: "render.engine",
                from_width = old.0,
                from_height = old.1,
                width,
                height,
                "buffers_resized"
            );
        }
        Ok((u32::from(width), u32::from(height)))
    }

    /// Snapshot of the engine's state and counters.
    pub fn performance_stats(&self) -> PerformanceStats {
        let (width, height) = self
            .surfaces
            .as_ref()
            .map_or((0, 0), |s| (u32::from(s.back.width()), u32::from(s.back.height())));
        let buffer_memory_bytes = self
            .surfaces
            .as_ref()
            .map_or(0, |s| s.front.memory_usage() + s.back.memory_usage());

        PerformanceStats {
            frame_count: self.frame_count,
            width,
            height,
            total_cells: u64::from(width) * u64::from(height),
            buffer_memory_bytes,
            initialized: self.phase.is_initialized(),
            in_frame: self.phase == Phase::InFrame,
            bytes_written: self.counters.bytes_written,
            last_frame_bytes: self.counters.last_frame_bytes,
            last_cells_changed: self.counters.last.cells_changed,
            last_runs: self.counters.last.runs,
            last_render_us: self.counters.last_render_us,
            avg_render_us: self.counters.avg_render_us,
            cache_entries: self.cache.len(),
        }
    }

    /// Restore the cursor and colors, release the buffers.
    ///
    /// Idempotent, and a no-op on an engine that was never initialized.
    /// Teardown errors are logged, not returned.
    pub fn cleanup(&mut self) {
        if !self.phase.is_initialized() {
            return;
        }

        let mut teardown = encode::RESET.to_vec();
        if self.config.hide_cursor {
            teardown.extend_from_slice(encode::CURSOR_SHOW);
        }
        if self.config.alternate_screen {
            teardown.extend_from_slice(encode::ALT_SCREEN_LEAVE);
        }
        if let Err(e) = self.backend.write_frame(&teardown) {
            warn!(target: "render.engine", error = %e, "cleanup_write_failed");
        }
        if let Err(e) = self.backend.leave(self.config.raw_mode) {
            warn!(target: "render.engine", error = %e, "cleanup_leave_failed");
        }

        self.surfaces = None;
        self.force_full_redraw = false;
        self.phase = Phase::Cleaned;
        debug!(target: "render.engine", frames = self.frame_count, "engine_cleaned_up");
    }

    /// Drop every cached control sequence.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Frames completed since `initialize`.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the next `end_frame` repaints every cell.
    pub const fn needs_full_redraw(&self) -> bool {
        self.force_full_redraw
    }

    /// Current buffer size, if initialized.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.surfaces
            .as_ref()
            .map(|s| (u32::from(s.back.width()), u32::from(s.back.height())))
    }

    /// Cell of the back buffer (the drawing surface) at `(x, y)`.
    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.back()?.get(x, y)
    }

    /// The committed buffer, i.e. what the terminal shows.
    pub fn front(&self) -> Option<&Buffer> {
        self.surfaces.as_ref().map(|s| &s.front)
    }

    /// The buffer being drawn.
    pub fn back(&self) -> Option<&Buffer> {
        self.surfaces.as_ref().map(|s| &s.back)
    }

    /// The configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably (e.g. to resize a [`TestBackend`](crate::TestBackend)).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn invalid(&self, operation: &'static str) -> EngineError {
        EngineError::InvalidState {
            operation,
            phase: self.phase,
        }
    }

    fn require_frame(&self, operation: &'static str) -> Result<(), EngineError> {
        if self.phase == Phase::InFrame {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn back_mut(&mut self, operation: &'static str) -> Result<&mut Buffer, EngineError> {
        self.require_frame(operation)?;
        self.surfaces
            .as_mut()
            .map(|s| &mut s.back)
            .ok_or(EngineError::NotInitialized)
    }

    fn query_size(&self) -> (u16, u16) {
        let (fallback_w, fallback_h) = self.config.fallback_size;
        let fallback = (fallback_w.max(1), fallback_h.max(1));
        match self.backend.size() {
            Ok((width, height)) if width > 0 && height > 0 => (width, height),
            Ok((width, height)) => {
                warn!(target: "render.terminal", width, height, "zero_terminal_size_using_fallback");
                fallback
            }
            Err(e) => {
                warn!(target: "render.terminal", error = %e, "terminal_size_unavailable_using_fallback");
                fallback
            }
        }
    }

    fn record_frame(&mut self, diff: DiffResult, start: Instant) {
        let elapsed = start.elapsed();
        let counters = &mut self.counters;
        counters.last = diff;
        counters.last_frame_bytes = self.output.len();
        counters.bytes_written += self.output.len() as u64;
        counters.last_render_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        // Smoothed average
        if counters.avg_render_us == 0 {
            counters.avg_render_us = counters.last_render_us;
        } else {
            counters.avg_render_us = (counters.avg_render_us * 15 + counters.last_render_us) / 16;
        }

        trace!(
            target: "render.diff",
            frame = self.frame_count,
            cells = diff.cells_changed,
            runs = diff.runs,
            styles = diff.style_changes,
            bytes = self.output.len(),
            "frame_rendered"
        );
        if elapsed > self.config.slow_frame {
            debug!(target: "render.engine", frame = self.frame_count, micros = counters.last_render_us, "slow_frame");
        }
    }
}

impl<B: Backend> Drop for Engine<B> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl<B: Backend> fmt::Debug for Engine<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("phase", &self.phase)
            .field("dimensions", &self.dimensions())
            .field("frame_count", &self.frame_count)
            .field("force_full_redraw", &self.force_full_redraw)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;
    use crate::terminal::TestBackend;
    use pretty_assertions::assert_eq;

    fn engine(width: u16, height: u16) -> Engine<TestBackend> {
        Engine::new(TestBackend::new(width, height), EngineConfig::default())
    }

    fn ready(width: u16, height: u16) -> Engine<TestBackend> {
        let mut engine = engine(width, height);
        engine.initialize().unwrap();
        engine.backend_mut().clear_writes();
        engine
    }

    #[test]
    fn test_phases() {
        let mut engine = engine(10, 4);
        assert_eq!(engine.phase(), Phase::Uninitialized);
        assert!(matches!(
            engine.begin_frame(),
            Err(EngineError::InvalidState { operation: "begin_frame", phase: Phase::Uninitialized })
        ));

        assert_eq!(engine.initialize().unwrap(), (10, 4));
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(matches!(engine.initialize(), Err(EngineError::AlreadyInitialized)));

        engine.begin_frame().unwrap();
        assert_eq!(engine.phase(), Phase::InFrame);
        assert!(matches!(
            engine.begin_frame(),
            Err(EngineError::InvalidState { operation: "begin_frame", phase: Phase::InFrame })
        ));

        engine.end_frame().unwrap();
        assert_eq!(engine.phase(), Phase::Idle);

        engine.cleanup();
        assert_eq!(engine.phase(), Phase::Cleaned);
        assert!(engine.back().is_none());
    }

    #[test]
    fn test_initialize_writes_setup_and_enters() {
        let config = EngineConfig::default().with_alternate_screen(true);
        let mut engine = Engine::new(TestBackend::new(8, 2), config);
        engine.initialize().unwrap();

        assert!(engine.backend().is_entered());
        assert_eq!(engine.backend().last_write(), Some(&b"\x1b[?1049h\x1b[?25l"[..]));
        assert!(engine.needs_full_redraw());
    }

    #[test]
    fn test_failed_setup_leaves_terminal_and_stays_uninitialized() {
        let mut engine = engine(8, 2);
        engine.backend_mut().fail_writes(true);

        assert!(matches!(engine.initialize(), Err(EngineError::Io(_))));
        assert!(!engine.backend().is_entered());
        assert_eq!(engine.phase(), Phase::Uninitialized);
        assert!(engine.back().is_none());

        engine.backend_mut().fail_writes(false);
        assert_eq!(engine.initialize().unwrap(), (8, 2));
    }

    #[test]
    fn test_zero_size_uses_fallback() {
        let config = EngineConfig::default().with_fallback_size(12, 3);
        let mut engine = Engine::new(TestBackend::new(0, 40), config);
        assert_eq!(engine.initialize().unwrap(), (12, 3));
    }

    #[test]
    fn test_drawing_outside_frame_is_rejected() {
        let mut engine = ready(10, 3);
        for result in [
            engine.write_at(0, 0, "x"),
            engine.clear(0, 0, 2, 2),
            engine.clear_line(1),
            engine.draw_box(0, 0, 4, 3, BoxVariant::Single, None),
            engine.end_frame(),
        ] {
            assert!(matches!(result, Err(EngineError::InvalidState { phase: Phase::Idle, .. })));
        }
        assert!(!engine.back().unwrap().has_dirty());
    }

    #[test]
    fn test_write_at_decodes_and_clips() {
        let mut engine = ready(6, 2);
        engine.begin_frame().unwrap();
        engine.write_at(3, 0, "\x1b[1mabcdef").unwrap();
        engine.write_at(-2, 1, "xyz").unwrap();
        engine.write_at(0, 5, "off").unwrap();

        let back = engine.back().unwrap();
        assert_eq!(back.row_text(0).unwrap(), "   abc");
        assert_eq!(back.row_text(1).unwrap(), "z     ");
        assert!(engine.cell(3, 0).unwrap().style().is_bold());
        assert_eq!(engine.cell(0, 1).unwrap().style(), Style::DEFAULT);
    }

    #[test]
    fn test_first_frame_is_full_then_incremental() {
        let mut engine = ready(4, 2);
        engine.begin_frame().unwrap();
        engine.end_frame().unwrap();
        assert_eq!(engine.performance_stats().last_cells_changed, 8);
        assert_eq!(engine.backend().writes().len(), 1);

        engine.begin_frame().unwrap();
        engine.end_frame().unwrap();
        assert_eq!(engine.performance_stats().last_cells_changed, 0);
        assert_eq!(engine.backend().writes().len(), 1);
        assert_eq!(engine.frame_count(), 2);
    }

    #[test]
    fn test_end_frame_commits_back_into_front() {
        let mut engine = ready(5, 1);
        engine.begin_frame().unwrap();
        engine.write_at(0, 0, "\x1b[38;2;9;8;7mhi").unwrap();
        engine.end_frame().unwrap();

        let front = engine.front().unwrap();
        let back = engine.back().unwrap();
        assert_eq!(front.cells(), back.cells());
        assert!(!back.has_dirty());
        assert_eq!(front.get(1, 0).unwrap().style(), Style::new().fg(Rgb::new(9, 8, 7)));
    }

    #[test]
    fn test_clear_and_clear_line() {
        let mut engine = ready(4, 3);
        engine.begin_frame().unwrap();
        for y in 0..3 {
            engine.write_at(0, y, "####").unwrap();
        }
        engine.clear(1, 0, 2, 2).unwrap();
        engine.clear_line(2).unwrap();
        engine.clear_line(9).unwrap();

        let back = engine.back().unwrap();
        assert_eq!(back.row_text(0).unwrap(), "#  #");
        assert_eq!(back.row_text(1).unwrap(), "#  #");
        assert_eq!(back.row_text(2).unwrap(), "    ");
    }

    #[test]
    fn test_synchronized_output_wraps_non_empty_frames() {
        let config = EngineConfig::default()
            .with_hide_cursor(false)
            .with_synchronized_output(true);
        let mut engine = Engine::new(TestBackend::new(3, 1), config);
        engine.initialize().unwrap();
        assert!(engine.backend().writes().is_empty());

        engine.begin_frame().unwrap();
        engine.write_at(0, 0, "abc").unwrap();
        engine.end_frame().unwrap();
        let frame = engine.backend().last_write().unwrap();
        assert!(frame.starts_with(b"\x1b[?2026h"));
        assert!(frame.ends_with(b"\x1b[0m\x1b[?2026l"));

        engine.begin_frame().unwrap();
        engine.end_frame().unwrap();
        assert_eq!(engine.backend().writes().len(), 1);
    }

    #[test]
    fn test_failed_write_forces_next_redraw() {
        let mut engine = ready(3, 1);
        engine.backend_mut().fail_writes(true);
        engine.begin_frame().unwrap();
        engine.write_at(0, 0, "abc").unwrap();
        assert!(matches!(engine.end_frame(), Err(EngineError::Io(_))));
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.frame_count(), 0);
        assert!(engine.needs_full_redraw());

        engine.backend_mut().fail_writes(false);
        engine.begin_frame().unwrap();
        engine.end_frame().unwrap();
        assert_eq!(engine.performance_stats().last_cells_changed, 3);
    }

    #[test]
    fn test_update_dimensions() {
        let mut engine = engine(10, 4);
        assert!(matches!(engine.update_dimensions(), Err(EngineError::NotInitialized)));
        engine.initialize().unwrap();
        engine.begin_frame().unwrap();
        engine.end_frame().unwrap();
        assert!(!engine.needs_full_redraw());

        assert_eq!(engine.update_dimensions().unwrap(), (10, 4));
        assert!(!engine.needs_full_redraw());

        engine.backend_mut().set_size(20, 6);
        engine.begin_frame().unwrap();
        assert!(engine.update_dimensions().unwrap_err().is_state_error());
        engine.end_frame().unwrap();

        assert_eq!(engine.update_dimensions().unwrap(), (20, 6));
        assert!(engine.needs_full_redraw());
        assert_eq!(engine.front().unwrap().width(), 20);
        assert_eq!(engine.back().unwrap().height(), 6);
    }

    #[test]
    fn test_stats_snapshot() {
        let mut engine = engine(8, 3);
        let stats = engine.performance_stats();
        assert!(!stats.initialized);
        assert_eq!(stats.total_cells, 0);

        engine.initialize().unwrap();
        engine.begin_frame().unwrap();
        let stats = engine.performance_stats();
        assert!(stats.initialized && stats.in_frame);
        assert_eq!((stats.width, stats.height, stats.total_cells), (8, 3, 24));
        assert!(stats.buffer_memory_bytes >= 2 * 24 * std::mem::size_of::<Cell>());

        engine.write_at(0, 0, "\x1b[7mx").unwrap();
        engine.end_frame().unwrap();
        let stats = engine.performance_stats();
        assert_eq!(stats.frame_count, 1);
        assert_eq!(stats.bytes_written, stats.last_frame_bytes as u64);
        assert!(stats.cache_entries > 0);

        engine.clear_cache();
        assert_eq!(engine.performance_stats().cache_entries, 0);
    }

    #[test]
    fn test_cleanup_is_idempotent_and_restores() {
        let mut engine = ready(4, 2);
        engine.cleanup();
        engine.cleanup();
        assert_eq!(engine.backend().writes().len(), 1);
        assert_eq!(engine.backend().last_write(), Some(&b"\x1b[0m\x1b[?25h"[..]));
        assert!(!engine.backend().is_entered());

        assert!(engine.write_at(0, 0, "x").is_err());
        assert_eq!(engine.initialize().unwrap(), (4, 2));
        assert_eq!(engine.frame_count(), 0);
    }

    #[test]
    fn test_request_clear_any_phase() {
        let mut engine = engine(2, 2);
        engine.request_clear();
        engine.initialize().unwrap();
        engine.begin_frame().unwrap();
        engine.end_frame().unwrap();
        engine.request_clear();
        engine.begin_frame().unwrap();
        engine.end_frame().unwrap();
        assert_eq!(engine.performance_stats().last_cells_changed, 4);
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Engine<TestBackend>>();
    }
}
