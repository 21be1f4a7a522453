#![no_std]

use dbgline::{
    debug, debugf, debugl, debuglf, fdebug, fdebugf, fdebugl, fdebuglf, function_name, location,
    set_debug_level, should_emit,
};

pub fn smoke() -> (&'static str, &'static str) {
    set_debug_level(3);
    debug!("d");
    debugl!(2, "l");
    debugf!("f {}", 1);
    debuglf!(2, "lf {}", 2);
    fdebug!(None, "fd");
    fdebugl!(1, None, "fdl");
    fdebugf!(None, "fdf {}", 3);
    fdebuglf!(1, None, "fdlf {}", 4);
    debug_assert!(should_emit(1, dbgline::debug_level()));
    (location!(), function_name!())
}
