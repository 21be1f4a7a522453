mod helpers;
use helpers::*;
use dbgline::{default_stream, resolve_stream, Stream};

#[test]
fn unset_stream_resolves_to_the_same_default() {
    let _g = serial();
    reset_runtime();

    assert!(dbgline::debug_stream().is_none());
    let a = resolve_stream(dbgline::debug_stream());
    let b = resolve_stream(None);
    assert!(a.same_as(&b));
    assert!(a.same_as(&default_stream()));
    assert_eq!(format!("{a:?}"), "Stream(\"Stderr\")");

    // resolving does not store the default
    assert!(dbgline::debug_stream().is_none());
}

#[test]
fn set_stream_is_returned_unchanged() {
    let (s, _mem) = Mem::stream();
    assert!(resolve_stream(Some(s.clone())).same_as(&s));
}

#[test]
fn setting_and_unsetting_the_global_stream() {
    let _g = serial();
    reset_runtime();

    let (s, _mem) = Mem::stream();
    dbgline::set_debug_stream(&s);
    assert!(dbgline::debug_stream().is_some_and(|c| c.same_as(&s)));

    dbgline::set_debug_stream(Stream::stdout());
    assert!(!dbgline::debug_stream().is_some_and(|c| c.same_as(&s)));

    dbgline::set_debug_stream(None);
    assert!(dbgline::debug_stream().is_none());
    assert!(resolve_stream(dbgline::debug_stream()).same_as(&default_stream()));
}

#[test]
fn explicit_none_goes_to_default_not_the_global_stream() {
    let _g = serial();
    let mem = attach_mem_sink(1);

    // stderr, not the memory sink
    dbgline::fdebug!(None, "to stderr");
    dbgline::fdebugf!(None, "to stderr {}", 2);

    assert!(mem.text().is_empty());
    reset_runtime();
}
