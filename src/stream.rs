use core::fmt::{self, Arguments, Display};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// A writable destination for debug lines.
///
/// Cloning is cheap and clones share the same sink.
#[derive(Clone)]
pub struct Stream(Arc<Sink>);

enum Sink {
    Stdout,
    Stderr,
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl Stream {
    /// Standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self(Arc::new(Sink::Stderr))
    }
    /// Standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self(Arc::new(Sink::Stdout))
    }
    /// Any byte sink.
    #[must_use]
    pub fn from_writer(w: impl Write + Send + 'static) -> Self {
        Self(Arc::new(Sink::Writer(Mutex::new(Box::new(w)))))
    }
    /// Opens `path` for appending, creating it if needed.
    /// # Errors
    /// This function will return an error if the file cannot be opened for writing.
    pub fn file(path: impl AsRef<Path>) -> io::Result<Self> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::from_writer(f))
    }

    /// `true` if both handles point at the same sink.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Writes `<location><function>: <message>\n` and flushes.
    pub fn write_line(&self, location: &str, function: &str, message: &dyn Display) {
        let mut buf = Vec::<u8>::new();
        let _ = writeln!(&mut buf, "{location}{function}: {message}");
        self.write_flushed(&buf);
    }

    /// Writes `<location><function>: `, then `args`, then a newline, and flushes.
    pub fn write_fmt_line(&self, location: &str, function: &str, args: Arguments) {
        let mut buf = Vec::<u8>::new();
        let _ = write!(&mut buf, "{location}{function}: ");
        let _ = buf.write_fmt(args);
        let _ = buf.write_all(b"\n");
        self.write_flushed(&buf);
    }

    // Sink errors are dropped: a debug line must never change the caller's
    // control flow.
    fn write_flushed(&self, bytes: &[u8]) {
        match &*self.0 {
            Sink::Stdout => {
                let mut out = io::stdout().lock();
                let _ = out.write_all(bytes);
                let _ = out.flush();
            }
            Sink::Stderr => {
                let mut err = io::stderr().lock();
                let _ = err.write_all(bytes);
                let _ = err.flush();
            }
            Sink::Writer(m) => {
                let mut w = m.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = w.write_all(bytes);
                let _ = w.flush();
            }
        }
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &*self.0 {
            Sink::Stdout => "Stdout",
            Sink::Stderr => "Stderr",
            Sink::Writer(_) => "Writer",
        };
        f.debug_tuple("Stream").field(&kind).finish()
    }
}

/// Anything an explicit-stream call form accepts: a [`Stream`], a
/// `&Stream`, or an `Option<Stream>` where `None` means "use the default".
pub trait IntoStream {
    /// Converts into a candidate stream, `None` being unset.
    fn into_stream(self) -> Option<Stream>;
}

impl IntoStream for Stream {
    #[inline]
    fn into_stream(self) -> Option<Stream> {
        Some(self)
    }
}

impl IntoStream for &Stream {
    #[inline]
    fn into_stream(self) -> Option<Stream> {
        Some(self.clone())
    }
}

impl IntoStream for Option<Stream> {
    #[inline]
    fn into_stream(self) -> Option<Stream> {
        self
    }
}
