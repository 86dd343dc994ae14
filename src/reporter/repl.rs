use super::commands::Command;
use super::console::Console;
use super::handlers::print_stats;
use super::session::Session;
use crate::error::{Result, TrackerError};
use std::io::{BufRead, Write};
use tracing::{debug, error};

pub const COMMAND_PROMPT: &str = "Please enter a command (1-9, x to exit): ";

/// The interactive loop: banner and stats once, then one command at a time
/// until `x` or end of input.
///
/// A failing command is reported and the loop carries on; only a broken
/// console ends the session with an error.
pub fn run<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) -> Result<()> {
    console.say("** Welcome to CTA L analysis app **")?;
    console.blank()?;
    print_stats(session, console)?;

    while let Some(line) = console.prompt(COMMAND_PROMPT)? {
        let command = match line.parse::<Command>() {
            Ok(Command::Exit) => break,
            Ok(command) => command,
            Err(_) => {
                console.say("**Error, unknown command, try again...")?;
                continue;
            }
        };

        debug!("Running {:?}", command);
        match command.execute(session, console) {
            Ok(()) => {}
            Err(TrackerError::Io(e)) => return Err(TrackerError::Io(e)),
            Err(e) => {
                error!("{:?} failed: {}", command, e);
                console.say(format!("**Error: {}", e))?;
            }
        }
    }
    Ok(())
}
