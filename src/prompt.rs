//! Line-oriented question/answer helper
//!
//! `Prompter` owns an input source and an output sink. Every interactive
//! step of a session goes through it, so tests can script a whole
//! conversation with an in-memory reader and inspect what was printed.
//!
//! # Example
//!
//! ```
//! use bikeshare::prompt::Prompter;
//! use std::io::Cursor;
//!
//! let input = Cursor::new("maybe\nYES\n");
//! let mut prompter = Prompter::new(input, Vec::new());
//! let answer = prompter
//!     .choose("Continue?\n", &["yes", "no"], "Please enter yes or no")
//!     .unwrap();
//! assert_eq!(answer, "yes");
//! ```

use crate::error::{BikeshareError, Result};
use colored::Colorize;
use std::fmt::Display;
use std::io::{BufRead, Write};
use tracing::debug;

/// Interactive prompt over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write a line of text
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Write a warning line
    pub fn complain(&mut self, text: &str) -> Result<()> {
        self.say(text.yellow())
    }

    /// Print `prompt` and read one answer, trimmed and lowercased
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::InputClosed`] when the input has no more
    /// lines.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }

        let answer = line.trim().to_lowercase();
        debug!(answer = %answer, "read answer");
        Ok(answer)
    }

    /// Ask until the answer is one of `allowed`
    ///
    /// Each rejected answer prints `retry` before asking again. There is
    /// no retry limit; only end of input stops the loop.
    pub fn choose(&mut self, prompt: &str, allowed: &[&str], retry: &str) -> Result<String> {
        let mut answer = self.ask(prompt)?;
        while !allowed.contains(&answer.as_str()) {
            self.complain(retry)?;
            answer = self.ask(prompt)?;
        }
        Ok(answer)
    }
}
