//! Destinations rendered lines are written to.
//!
//! Any [`Write`] implementation that is [`Send`] can be used as a sink. Write errors reported by a sink are ignored
//! by the [`Logger`][crate::Logger].
//!
//! # Built-in Sinks
//!
//! - [`buffered_stdout`] - The default sink, a buffered handle to stdout.
//! - [`MemorySink`] - Collects lines in memory, for tests and embedding.

use std::io::{self, BufWriter, Stdout, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A type-erased sink.
pub type BoxedSink = Box<dyn Write + Send>;

/// Returns a buffered handle to stdout.
///
/// Lines only become visible once the buffer fills up or the logger is [flushed][crate::Logger::flush].
pub fn buffered_stdout() -> BufWriter<Stdout> {
    BufWriter::new(io::stdout())
}

/// A sink storing everything written to it in a shared buffer.
///
/// Clones share the same buffer, so a clone can be handed to a logger while the original is kept to inspect the
/// output.
///
/// # Examples
///
/// ```rust
/// use pipelog::Logger;
/// use pipelog::sink::MemorySink;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder().output(sink.clone()).color(false).build();
///
/// logger.info("Hello World");
/// assert!(sink.contents().ends_with("|Hello World\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns everything written so far and clears the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
