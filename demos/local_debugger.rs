use dbgline::local::{debug, debugf, debuglf, Debugger};
use dbgline::Stream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let verbose = Debugger::builder().level(3).stream(Stream::stdout()).build()?;
    let quiet = Debugger::builder().level(1).build()?;

    debug!(&verbose, "Hello from the verbose debugger");
    debuglf!(&verbose, 3, "{} is visible here", "level 3");
    debuglf!(&quiet, 3, "{} is filtered here", "level 3");
    debugf!(&quiet, "quiet still shows level {}", 1);

    dbgline::debug!("and the global one writes to stderr");
    Ok(())
}
