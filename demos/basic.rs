use dbgline::{
    debug, debugf, debugl, debuglf, fdebug, fdebuglf, init_from_env, set_debug_level, Stream,
    DEBUG_MAX_LENGTH,
};

fn parse(input: &str) -> usize {
    debuglf!(2, "parsing {} bytes", input.len());
    let words = input.split_whitespace().count();
    debuglf!(3, "words: {:?}", input.split_whitespace().collect::<Vec<_>>());
    words
}

fn main() -> std::io::Result<()> {
    // Environment (optional):
    //   DBGLINE_LEVEL=3 DBGLINE_STREAM=stdout|stderr|/path/to/file
    set_debug_level(2);
    init_from_env()?;

    debug!("starting");
    debugf!("messages should stay under {} columns", DEBUG_MAX_LENGTH);
    debugl!(3, "only visible with DBGLINE_LEVEL=3 or more");

    let n = parse("the quick brown fox");
    fdebug!(Stream::stdout(), format!("{n} words"));
    fdebuglf!(1, None, "explicit level, default stream");
    Ok(())
}
