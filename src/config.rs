//! Build-time defaults and environment overrides.

/// Initial debug threshold. Set `DBGLINE_DEFAULT_LEVEL` at build time to
/// change it; otherwise 1.
pub const DEFAULT_DEBUG_LEVEL: u32 = parse_u32(option_env!("DBGLINE_DEFAULT_LEVEL"), 1);

/// Suggested maximum width of the message part of a line, for callers that
/// wrap to a terminal. Nothing truncates to it. Set `DBGLINE_MAX_LENGTH` at
/// build time to change it; otherwise 60.
#[allow(clippy::cast_possible_truncation)]
pub const DEBUG_MAX_LENGTH: usize = parse_u32(option_env!("DBGLINE_MAX_LENGTH"), 60) as usize;

/// Decimal digits only; anything else, or an overflow, yields `default`.
const fn parse_u32(s: Option<&str>, default: u32) -> u32 {
    let Some(s) = s else { return default };
    let b = s.as_bytes();
    if b.is_empty() {
        return default;
    }
    let mut v: u32 = 0;
    let mut i = 0;
    while i < b.len() {
        let d = b[i];
        if !d.is_ascii_digit() {
            return default;
        }
        v = match v.checked_mul(10) {
            Some(x) => x,
            None => return default,
        };
        v = match v.checked_add((d - b'0') as u32) {
            Some(x) => x,
            None => return default,
        };
        i += 1;
    }
    v
}

/// Initialize the threshold and stream from environment variables.
///
/// - `DBGLINE_LEVEL`: unsigned threshold; ignored if it does not parse.
/// - `DBGLINE_STREAM`: `stderr`, `stdout`, empty to unset, or a file path
///   opened for appending.
///
/// # Errors
/// This function will return an error if `DBGLINE_STREAM` names a file that
/// cannot be opened; the stream is left as it was.
#[cfg(feature = "std")]
pub fn init_from_env() -> std::io::Result<()> {
    use crate::{set_debug_level, set_debug_stream, Stream};

    if let Ok(s) = std::env::var("DBGLINE_LEVEL") {
        if let Ok(l) = s.trim().parse::<u32>() {
            set_debug_level(l);
        }
    }
    if let Ok(s) = std::env::var("DBGLINE_STREAM") {
        let stream = match s.trim() {
            "" => None,
            t if t.eq_ignore_ascii_case("stderr") => Some(Stream::stderr()),
            t if t.eq_ignore_ascii_case("stdout") => Some(Stream::stdout()),
            path => Some(Stream::file(path)?),
        };
        set_debug_stream(stream);
    }
    Ok(())
}
