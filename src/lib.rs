#![warn(missing_docs, unsafe_code)]
//! Leveled debug lines tagged with source location and calling function.
//!
//! Every line has the shape
//!
//! ```text
//! <file> <line> <function>: <message>
//! ```
//!
//! and is written to the current debug stream (standard error unless set),
//! then flushed. A line is written only when `0 < level <= debug_level()`.
//!
//! In builds without debugging (no `debugging` feature, no `std`, or a release
//! profile without `release-debugging`) every call form expands to `()` and
//! none of its arguments are evaluated. With debugging on, arguments are still
//! skipped whenever the level gate rejects the call, but a call that passes
//! evaluates them. Code that relies on a side effect inside a debug argument
//! therefore behaves differently between the two modes.
//!
//! ```
//! use dbgline::{debug, debugf, debuglf, fdebug, Stream};
//!
//! dbgline::set_debug_level(2);
//! debug!("starting");
//! debugf!("{} workers", 4);
//! debuglf!(3, "too verbose: {:?}", [1, 2, 3]); // filtered out
//! fdebug!(Stream::stdout(), "to stdout");
//! ```
//!
//! Run the test suite in both modes: `cargo test` exercises the enabled
//! paths, `cargo test --release` (or `--no-default-features`) the compiled-out
//! ones.
//!
//! # Concurrency
//!
//! The threshold and the stream slot are process-wide. They sit behind an
//! atomic and a mutex only so that safe code can mutate them; nothing orders
//! emissions from different threads or makes a threshold change visible to
//! another thread at any particular point.
#![cfg_attr(not(feature = "std"), no_std)]

use core::sync::atomic::{AtomicU32, Ordering};

mod config;
#[cfg(feature = "std")]
pub mod local;
#[cfg(feature = "std")]
mod stream;

pub use config::{DEBUG_MAX_LENGTH, DEFAULT_DEBUG_LEVEL};
#[cfg(feature = "std")]
pub use config::init_from_env;
#[cfg(feature = "std")]
pub use stream::{IntoStream, Stream};

/// `true` when this build emits debug lines.
pub const DEBUGGING_ENABLED: bool = cfg!(all(
    feature = "std",
    feature = "debugging",
    any(debug_assertions, feature = "release-debugging")
));

/// Printed instead of a function name when none can be resolved.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

// ===== Threshold =====
static DEBUG_LEVEL: AtomicU32 = AtomicU32::new(DEFAULT_DEBUG_LEVEL);

/// Returns the current debug threshold.
#[inline]
pub fn debug_level() -> u32 {
    DEBUG_LEVEL.load(Ordering::Relaxed)
}

/// Sets the debug threshold. Larger is more verbose; 0 silences everything.
#[inline]
pub fn set_debug_level(level: u32) {
    DEBUG_LEVEL.store(level, Ordering::Relaxed);
}

/// Decides whether a line at `level` passes `threshold`.
///
/// Levels are signed so that a negative argument is rejected instead of
/// wrapping around to a huge unsigned value. Level 0 is reserved and never
/// passes.
#[inline]
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn should_emit(level: i64, threshold: u32) -> bool {
    level > 0 && level <= threshold as i64
}

/// [`should_emit`] against the current [`debug_level`].
#[inline]
#[must_use]
pub fn enabled(level: i64) -> bool {
    should_emit(level, debug_level())
}

// ===== Stream slot =====
#[cfg(feature = "std")]
mod imp {
    use core::fmt::{Arguments, Display};
    use std::sync::{Mutex, OnceLock, PoisonError};

    use crate::{enabled, IntoStream, Stream};

    static DEBUG_STREAM: Mutex<Option<Stream>> = Mutex::new(None);
    // stderr is not a constant, so the default handle is made on first use
    static DEFAULT_STREAM: OnceLock<Stream> = OnceLock::new();

    /// Returns the stream set with [`set_debug_stream`], or `None` if unset.
    pub fn debug_stream() -> Option<Stream> {
        DEBUG_STREAM
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sets the process-wide debug stream. Passing `None` unsets it, so the
    /// default (standard error) is used again.
    pub fn set_debug_stream(stream: impl IntoStream) {
        *DEBUG_STREAM.lock().unwrap_or_else(PoisonError::into_inner) = stream.into_stream();
    }

    /// The stream used whenever none is given. Always the same handle.
    pub fn default_stream() -> Stream {
        DEFAULT_STREAM.get_or_init(Stream::stderr).clone()
    }

    /// Returns `candidate`, or the [`default_stream`] when it is `None`.
    ///
    /// No attempt is made to check that the default is still usable. If the
    /// embedding program has closed or broken standard error, writes to it
    /// fail and the failure is silently dropped.
    #[inline]
    pub fn resolve_stream(candidate: Option<Stream>) -> Stream {
        candidate.unwrap_or_else(default_stream)
    }

    /// Writes `<location><function>: <message>` to `stream` when `level`
    /// passes the gate.
    pub fn emit(
        level: i64,
        stream: Option<Stream>,
        location: &str,
        function: &str,
        message: &dyn Display,
    ) {
        if !enabled(level) {
            return;
        }
        resolve_stream(stream).write_line(location, function, message);
    }

    /// Like [`emit`], with the message given as format arguments.
    pub fn emitf(
        level: i64,
        stream: Option<Stream>,
        location: &str,
        function: &str,
        args: Arguments,
    ) {
        if !enabled(level) {
            return;
        }
        resolve_stream(stream).write_fmt_line(location, function, args);
    }
}

#[cfg(feature = "std")]
pub use imp::{debug_stream, default_stream, emit, emitf, resolve_stream, set_debug_stream};

// ===== Location and function name =====
#[doc(hidden)]
pub mod __private {
    /// Name of the item `function_name!` plants at the call site.
    pub const HERE: &str = "__dbgline_here";

    /// Integer levels widened to `i64`. Values past either end saturate, so
    /// they stay on the side of the gate they started on.
    pub trait IntoLevel {
        fn into_level(self) -> i64;
    }

    macro_rules! signed_level {
        ($($t:ty),*) => {$(
            impl IntoLevel for $t {
                #[inline]
                fn into_level(self) -> i64 {
                    i64::try_from(self).unwrap_or(if self < 0 { i64::MIN } else { i64::MAX })
                }
            }
        )*};
    }
    macro_rules! unsigned_level {
        ($($t:ty),*) => {$(
            impl IntoLevel for $t {
                #[inline]
                fn into_level(self) -> i64 {
                    i64::try_from(self).unwrap_or(i64::MAX)
                }
            }
        )*};
    }
    signed_level!(i8, i16, i32, i64, i128, isize);
    unsigned_level!(u8, u16, u32, u64, u128, usize);

    #[inline]
    pub fn type_name_of<T>(_: T) -> &'static str {
        core::any::type_name::<T>()
    }

    /// Turns the type name of the planted item into the caller's name.
    pub fn function_name(path: &'static str) -> &'static str {
        let path = path
            .strip_suffix(HERE)
            .and_then(|p| p.strip_suffix("::"))
            .unwrap_or(path);
        let name = if cfg!(feature = "pretty-function") {
            path
        } else {
            short_name(path)
        };
        if name.is_empty() {
            crate::UNKNOWN_FUNCTION
        } else {
            name
        }
    }

    fn short_name(path: &str) -> &str {
        path.rsplit("::")
            .find(|seg| *seg != "{{closure}}")
            .unwrap_or(path)
    }

}

/// Expands to `"<file> <line> "` for the call site, as a `&'static str`.
#[macro_export]
macro_rules! location {
    () => {
        ::core::concat!(::core::file!(), " ", ::core::line!(), " ")
    };
}

/// Expands to the name of the enclosing function.
///
/// With the `pretty-function` feature this is the full path
/// (`my_crate::worker::run`), otherwise the bare name (`run`).
///
/// `type_name` is not a `const fn` on stable, so the helper suffix is
/// stripped (and, without `pretty-function`, the last segment picked) at run
/// time on every call. The pretty/bare choice itself is fixed per build.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __dbgline_here() {}
        $crate::__private::function_name($crate::__private::type_name_of(__dbgline_here))
    }};
}

// ===== Call forms =====
#[cfg(all(
    feature = "std",
    feature = "debugging",
    any(debug_assertions, feature = "release-debugging")
))]
mod enabled_macros {
    /// Writes a message at `level` to `stream`. Neither `stream` nor the
    /// message is evaluated when the level is filtered out.
    #[macro_export]
    macro_rules! fdebugl {
        ($level:expr, $stream:expr, $msg:expr $(,)?) => {{
            let __level = $crate::__private::IntoLevel::into_level($level);
            if $crate::enabled(__level) {
                $crate::emit(
                    __level,
                    $crate::IntoStream::into_stream($stream),
                    $crate::location!(),
                    $crate::function_name!(),
                    &$msg,
                );
            }
        }};
    }
    /// `fdebugl!(1, debug_stream(), msg)`
    #[macro_export]
    macro_rules! debug { ($msg:expr $(,)?) => { $crate::fdebugl!(1, $crate::debug_stream(), $msg) } }
    /// `fdebugl!(1, stream, msg)`
    #[macro_export]
    macro_rules! fdebug { ($stream:expr, $msg:expr $(,)?) => { $crate::fdebugl!(1, $stream, $msg) } }
    /// `fdebugl!(level, debug_stream(), msg)`
    #[macro_export]
    macro_rules! debugl { ($level:expr, $msg:expr $(,)?) => { $crate::fdebugl!($level, $crate::debug_stream(), $msg) } }

    /// Writes a `format_args!` message at `level` to `stream`. Nothing past
    /// `level` is evaluated when the level is filtered out.
    #[macro_export]
    macro_rules! fdebuglf {
        ($level:expr, $stream:expr, $($arg:tt)+) => {{
            let __level = $crate::__private::IntoLevel::into_level($level);
            if $crate::enabled(__level) {
                $crate::emitf(
                    __level,
                    $crate::IntoStream::into_stream($stream),
                    $crate::location!(),
                    $crate::function_name!(),
                    ::core::format_args!($($arg)+),
                );
            }
        }};
    }
    /// `fdebuglf!(1, debug_stream(), fmt, ...)`
    #[macro_export]
    macro_rules! debugf { ($($arg:tt)+) => { $crate::fdebuglf!(1, $crate::debug_stream(), $($arg)+) } }
    /// `fdebuglf!(1, stream, fmt, ...)`
    #[macro_export]
    macro_rules! fdebugf { ($stream:expr, $($arg:tt)+) => { $crate::fdebuglf!(1, $stream, $($arg)+) } }
    /// `fdebuglf!(level, debug_stream(), fmt, ...)`
    #[macro_export]
    macro_rules! debuglf { ($level:expr, $($arg:tt)+) => { $crate::fdebuglf!($level, $crate::debug_stream(), $($arg)+) } }
}

// Debugging off: every form still parses but expands to `()`, so no argument
// is evaluated.
#[cfg(not(all(
    feature = "std",
    feature = "debugging",
    any(debug_assertions, feature = "release-debugging")
)))]
mod disabled_macros {
    /// no-op
    #[macro_export]
    macro_rules! fdebugl { ($($t:tt)*) => { () } }
    /// no-op
    #[macro_export]
    macro_rules! debug { ($($t:tt)*) => { () } }
    /// no-op
    #[macro_export]
    macro_rules! fdebug { ($($t:tt)*) => { () } }
    /// no-op
    #[macro_export]
    macro_rules! debugl { ($($t:tt)*) => { () } }
    /// no-op
    #[macro_export]
    macro_rules! fdebuglf { ($($t:tt)*) => { () } }
    /// no-op
    #[macro_export]
    macro_rules! debugf { ($($t:tt)*) => { () } }
    /// no-op
    #[macro_export]
    macro_rules! fdebugf { ($($t:tt)*) => { () } }
    /// no-op
    #[macro_export]
    macro_rules! debuglf { ($($t:tt)*) => { () } }
}
