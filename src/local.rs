//! A debugger with its own threshold and stream.
//!
//! ```
//! use dbgline::local::{debugf, Debugger};
//!
//! let dbg = Debugger::builder().level(3).stream(dbgline::Stream::stdout()).build()?;
//! debugf!(&dbg, "{} items", 12);
//! # Ok::<(), std::io::Error>(())
//! ```
use core::fmt::{Arguments, Display};
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::{resolve_stream, should_emit, IntoStream, Stream, DEFAULT_DEBUG_LEVEL};

/// Local debugger
pub struct Debugger {
    level: AtomicU32,
    stream: Mutex<Option<Stream>>,
}

impl Default for Debugger {
    fn default() -> Self {
        Self {
            level: AtomicU32::new(DEFAULT_DEBUG_LEVEL),
            stream: Mutex::new(None),
        }
    }
}

impl Debugger {
    #[inline]
    #[must_use]
    /// Create a new `DebuggerBuilder`
    pub fn builder() -> DebuggerBuilder {
        DebuggerBuilder::default()
    }

    #[inline]
    #[must_use]
    /// Current threshold
    pub fn level(&self) -> u32 {
        self.level.load(Ordering::Relaxed)
    }
    #[inline]
    /// Set the threshold
    pub fn set_level(&self, level: u32) {
        self.level.store(level, Ordering::Relaxed);
    }
    #[must_use]
    /// Stream set on this debugger, if any
    pub fn stream(&self) -> Option<Stream> {
        self.stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
    /// Set the stream; `None` falls back to the process default
    pub fn set_stream(&self, stream: impl IntoStream) {
        *self.stream.lock().unwrap_or_else(PoisonError::into_inner) = stream.into_stream();
    }

    #[inline]
    #[must_use]
    /// Whether a line at `level` passes this debugger's threshold
    pub fn enabled(&self, level: i64) -> bool {
        should_emit(level, self.level())
    }

    /// Emit a plain message
    pub fn emit(&self, level: i64, location: &str, function: &str, message: &dyn Display) {
        if !self.enabled(level) {
            return;
        }
        resolve_stream(self.stream()).write_line(location, function, message);
    }

    /// Emit a formatted message
    pub fn emitf(&self, level: i64, location: &str, function: &str, args: Arguments) {
        if !self.enabled(level) {
            return;
        }
        resolve_stream(self.stream()).write_fmt_line(location, function, args);
    }
}

/// Builder for `Debugger`
pub struct DebuggerBuilder {
    level: u32,
    stream: Option<Stream>,
    file_path: Option<std::path::PathBuf>,
}

impl Default for DebuggerBuilder {
    fn default() -> Self {
        Self {
            level: DEFAULT_DEBUG_LEVEL,
            stream: None,
            file_path: None,
        }
    }
}

impl DebuggerBuilder {
    #[inline]
    #[must_use]
    /// Set the threshold
    pub const fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
    #[inline]
    #[must_use]
    /// Set the stream
    pub fn stream(mut self, stream: impl IntoStream) -> Self {
        self.stream = stream.into_stream();
        self.file_path = None;
        self
    }
    #[inline]
    #[must_use]
    /// Write to a file, opened for appending by `build`
    pub fn file(mut self, p: impl AsRef<std::path::Path>) -> Self {
        self.file_path = Some(p.as_ref().to_owned());
        self
    }

    /// Build the debugger
    /// # Errors
    /// This function will return an error if the file cannot be opened for writing
    pub fn build(self) -> io::Result<Debugger> {
        let stream = match self.file_path {
            Some(p) => Some(Stream::file(p)?),
            None => self.stream,
        };
        Ok(Debugger {
            level: AtomicU32::new(self.level),
            stream: Mutex::new(stream),
        })
    }

    /// Build the debugger and leak it
    /// # Errors
    /// This function will return an error if the file cannot be opened for writing
    pub fn build_static(self) -> io::Result<&'static Debugger> {
        Ok(Box::leak(Box::new(self.build()?)))
    }
}

// ===== Macros (take a debugger first) =====
// Use them through this module: `use dbgline::local::debugf; debugf!(dbg, ...)`.

#[cfg(all(feature = "debugging", any(debug_assertions, feature = "release-debugging")))]
mod enabled_macros {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __dbgline_local_debugl {
        ($dbg:expr, $level:expr, $msg:expr $(,)?) => {{
            let __dbg: &$crate::local::Debugger = &*$dbg; // evaluate once
            let __level = $crate::__private::IntoLevel::into_level($level);
            if __dbg.enabled(__level) {
                __dbg.emit(__level, $crate::location!(), $crate::function_name!(), &$msg);
            }
        }};
    }
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __dbgline_local_debuglf {
        ($dbg:expr, $level:expr, $($arg:tt)+) => {{
            let __dbg: &$crate::local::Debugger = &*$dbg; // evaluate once
            let __level = $crate::__private::IntoLevel::into_level($level);
            if __dbg.enabled(__level) {
                __dbg.emitf(__level, $crate::location!(), $crate::function_name!(), ::core::format_args!($($arg)+));
            }
        }};
    }
}

#[cfg(not(all(feature = "debugging", any(debug_assertions, feature = "release-debugging"))))]
mod disabled_macros {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __dbgline_local_debugl { ($($t:tt)*) => { () } }
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __dbgline_local_debuglf { ($($t:tt)*) => { () } }
}

#[macro_export]
#[doc(hidden)]
macro_rules! __dbgline_local_debug { ($dbg:expr, $msg:expr $(,)?) => { $crate::__dbgline_local_debugl!($dbg, 1, $msg) } }
#[macro_export]
#[doc(hidden)]
macro_rules! __dbgline_local_debugf { ($dbg:expr, $($arg:tt)+) => { $crate::__dbgline_local_debuglf!($dbg, 1, $($arg)+) } }

pub use crate::__dbgline_local_debug as debug;
pub use crate::__dbgline_local_debugf as debugf;
pub use crate::__dbgline_local_debugl as debugl;
pub use crate::__dbgline_local_debuglf as debuglf;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Mem(Arc<Mutex<Vec<u8>>>);
    impl Write for Mem {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn text(m: &Mem) -> String {
        String::from_utf8(m.0.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn builder_defaults() {
        let d = Debugger::builder().build().unwrap();
        assert_eq!(d.level(), DEFAULT_DEBUG_LEVEL);
        assert!(d.stream().is_none());
    }

    #[test]
    fn emit_respects_own_threshold() {
        let mem = Mem::default();
        let d = Debugger::builder()
            .level(2)
            .stream(Stream::from_writer(mem.clone()))
            .build()
            .unwrap();
        d.emit(1, "a.rs 1 ", "f", &"one");
        d.emit(2, "a.rs 2 ", "f", &"two");
        d.emit(3, "a.rs 3 ", "f", &"three");
        d.emitf(0, "a.rs 4 ", "f", format_args!("zero"));
        d.emitf(-2, "a.rs 5 ", "f", format_args!("negative"));
        assert_eq!(text(&mem), "a.rs 1 f: one\na.rs 2 f: two\n");

        d.set_level(3);
        d.emitf(3, "a.rs 6 ", "f", format_args!("{}", 3));
        assert!(text(&mem).ends_with("a.rs 6 f: 3\n"));
    }

    #[test]
    fn set_stream_none_unsets() {
        let d = Debugger::default();
        d.set_stream(Stream::stdout());
        assert!(d.stream().is_some());
        d.set_stream(None);
        assert!(d.stream().is_none());
    }
}
