use crate::error::Result;
use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-based prompt/print channel for the interactive reporter
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` without a newline and read one line of input.
    /// Returns `None` once the input is exhausted.
    pub fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Like [`prompt`](Self::prompt), with end of input read as an empty answer
    pub fn ask(&mut self, message: &str) -> Result<String> {
        Ok(self.prompt(message)?.unwrap_or_default())
    }

    /// A `y`/`n` question; anything but `y` (any case) is a no
    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        Ok(self.ask(message)?.trim().eq_ignore_ascii_case("y"))
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
