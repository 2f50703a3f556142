//! Backends: where frames go and where the screen size comes from.
//!
//! The engine only ever needs two things from a terminal: its geometry and
//! a sink for one batched write per frame. [`CrosstermBackend`] talks to
//! the process's real terminal; [`TestBackend`] keeps everything in memory.

use std::io::{self, Stdout, Write};

/// The terminal seen by the render engine.
pub trait Backend {
    /// Current size as `(columns, rows)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried (e.g. not a TTY).
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Write one complete frame and flush it.
    ///
    /// The engine calls this at most once per frame with the whole batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Prepare the terminal before the first frame (e.g. raw mode).
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    fn enter(&mut self, _raw_mode: bool) -> io::Result<()> {
        Ok(())
    }

    /// Undo [`Backend::enter`].
    ///
    /// # Errors
    ///
    /// Returns an error if terminal teardown fails.
    fn leave(&mut self, _raw_mode: bool) -> io::Result<()> {
        Ok(())
    }
}

/// Backend for the process's standard output, using crossterm for
/// geometry and raw mode.
#[derive(Debug)]
pub struct CrosstermBackend {
    stdout: Stdout,
}

impl CrosstermBackend {
    /// Create a backend writing to standard output.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CrosstermBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(bytes)?;
        out.flush()
    }

    fn enter(&mut self, raw_mode: bool) -> io::Result<()> {
        if raw_mode {
            crossterm::terminal::enable_raw_mode()?;
        }
        Ok(())
    }

    fn leave(&mut self, raw_mode: bool) -> io::Result<()> {
        if raw_mode {
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }
}

/// In-memory backend: settable size, every write recorded separately.
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    size: (u16, u16),
    writes: Vec<Vec<u8>>,
    entered: bool,
    fail_writes: bool,
}

impl TestBackend {
    /// Create a backend reporting `width` × `height`.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    /// Change the reported size, as if the terminal had been resized.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    /// Make every subsequent write fail with `BrokenPipe`.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// All writes so far, one entry per `write_frame` call.
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// The most recent write.
    pub fn last_write(&self) -> Option<&[u8]> {
        self.writes.last().map(Vec::as_slice)
    }

    /// Every write concatenated, i.e. what a terminal would have received.
    pub fn output(&self) -> Vec<u8> {
        self.writes.concat()
    }

    /// Drop the recorded writes.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Whether `enter` has been called without a matching `leave`.
    pub const fn is_entered(&self) -> bool {
        self.entered
    }
}

impl Backend for TestBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "test backend closed"));
        }
        self.writes.push(bytes.to_vec());
        Ok(())
    }

    fn enter(&mut self, _raw_mode: bool) -> io::Result<()> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self, _raw_mode: bool) -> io::Result<()> {
        self.entered = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_records_each_write() {
        let mut backend = TestBackend::new(80, 24);
        backend.write_frame(b"one").unwrap();
        backend.write_frame(b"two").unwrap();

        assert_eq!(backend.writes().len(), 2);
        assert_eq!(backend.last_write(), Some(&b"two"[..]));
        assert_eq!(backend.output(), b"onetwo");
    }

    #[test]
    fn test_backend_size_and_failures() {
        let mut backend = TestBackend::new(80, 24);
        assert_eq!(backend.size().unwrap(), (80, 24));
        backend.set_size(100, 30);
        assert_eq!(backend.size().unwrap(), (100, 30));

        backend.fail_writes(true);
        let err = backend.write_frame(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(backend.writes().is_empty());
    }
}
