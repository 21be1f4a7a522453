mod helpers;
use helpers::*;
use std::cell::Cell;

#[test]
fn mode_matches_build_configuration() {
    let expected = cfg!(all(
        feature = "std",
        feature = "debugging",
        any(debug_assertions, feature = "release-debugging")
    ));
    assert_eq!(dbgline::DEBUGGING_ENABLED, expected);
}

// With debugging compiled out nothing is written or flushed and no argument
// is touched; with it compiled in, the same calls write one line each.
#[test]
fn calls_are_inert_when_compiled_out() {
    let _g = serial();
    let mem = attach_mem_sink(u32::MAX);
    let touched = Cell::new(0);
    let touch = |s: &'static str| {
        touched.set(touched.get() + 1);
        s
    };

    dbgline::debug!(touch("a"));
    dbgline::debugl!(touch("").len() + 1, "b");
    dbgline::debugf!("{}", touch("c"));
    dbgline::debuglf!(1, "{}", touch("d"));
    dbgline::fdebug!(None, touch("e"));
    dbgline::fdebugl!(1, None, touch("f"));
    dbgline::fdebugf!(None, "{}", touch("g"));
    dbgline::fdebuglf!(1, None, "{}", touch("h"));

    if dbgline::DEBUGGING_ENABLED {
        assert_eq!(touched.get(), 8);
        assert_eq!(mem.lines().len(), 4);
    } else {
        assert_eq!(touched.get(), 0);
        assert!(mem.text().is_empty());
        assert_eq!(mem.flush_count(), 0);
    }
    reset_runtime();
}
