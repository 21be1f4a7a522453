#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use dbgline::Stream;

// Global lock to serialize tests (threshold and stream are process-wide)
pub fn test_lock() -> &'static Mutex<()> {
    static L: OnceLock<Mutex<()>> = OnceLock::new();
    L.get_or_init(|| Mutex::new(()))
}

/// Take the test lock; a panic in another test does not poison the rest
pub fn serial() -> MutexGuard<'static, ()> {
    test_lock().lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory sink that counts flushes.
#[derive(Clone, Default)]
pub struct Mem {
    pub buf: Arc<Mutex<Vec<u8>>>,
    pub flushes: Arc<Mutex<usize>>,
}
impl Write for Mem {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}
impl Mem {
    pub fn stream() -> (Stream, Self) {
        let mem = Self::default();
        (Stream::from_writer(mem.clone()), mem)
    }
    pub fn text(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }
    pub fn lines(&self) -> Vec<String> {
        self.text()
            .lines()
            .map(std::string::ToString::to_string)
            .collect()
    }
    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

/// Point the global stream at a fresh in-memory sink and set the threshold.
/// Hold `serial()` while calling this.
pub fn attach_mem_sink(level: u32) -> Mem {
    let (stream, mem) = Mem::stream();
    dbgline::set_debug_stream(stream);
    dbgline::set_debug_level(level);
    mem
}

/// Put the process-wide state back to its defaults
pub fn reset_runtime() {
    dbgline::set_debug_stream(None);
    dbgline::set_debug_level(dbgline::DEFAULT_DEBUG_LEVEL);
}
