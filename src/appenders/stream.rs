//! Stream appender and the swappable output streams it writes to

use crate::core::{Appender, Formatter, LodgeError, LogRecord, Result};
use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// A shared, thread-safe output stream.
///
/// Cloning a `LogStream` yields another handle to the same writer. Every
/// record is written with a single `write_all` under the stream lock, so
/// concurrent records never interleave.
#[derive(Clone)]
pub struct LogStream {
    label: &'static str,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl LogStream {
    /// The process's standard error
    pub fn stderr() -> Self {
        Self {
            label: "stderr",
            writer: Arc::new(Mutex::new(Box::new(io::stderr()))),
        }
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            label: "writer",
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Append to a file, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LodgeError::io_operation(
                    "opening log stream",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            label: "file",
            writer: Arc::new(Mutex::new(Box::new(file))),
        })
    }

    /// True when both handles share one writer
    pub fn same_as(&self, other: &LogStream) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }

    pub fn write_text(&self, text: &str) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

impl Default for LogStream {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStream").field("label", &self.label).finish()
    }
}

/// In-memory stream for capturing output in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    /// Return the contents and clear the buffer
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.buffer.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl From<MemoryStream> for LogStream {
    fn from(memory: MemoryStream) -> Self {
        Self {
            label: "memory",
            writer: Arc::new(Mutex::new(Box::new(memory))),
        }
    }
}

/// Formats each record and writes it, plus any trace text, to a [`LogStream`]
pub struct StreamAppender {
    formatter: Formatter,
    stream: LogStream,
}

impl StreamAppender {
    pub fn new(formatter: Formatter, stream: LogStream) -> Self {
        Self { formatter, stream }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn stream(&self) -> &LogStream {
        &self.stream
    }

    fn render(&self, record: &LogRecord) -> Result<String> {
        let mut text = self.formatter.format(record)?;
        if let Some(ref trace) = record.trace {
            text.push('\n');
            text.push_str(trace.trim_end_matches('\n'));
        }
        text.push('\n');
        Ok(text)
    }
}

impl Appender for StreamAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let text = self.render(record)?;
        self.stream
            .write_text(&text)
            .map_err(|e| LodgeError::io_operation("writing log record", self.stream.label, e))
    }

    fn flush(&mut self) -> Result<()> {
        self.stream.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stream"
    }
}
