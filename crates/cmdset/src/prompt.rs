//! Interactive yes/no confirmation.
//!
//! Handlers that need confirmation take a [`Confirm`] implementation from the
//! embedding application, so tests can answer prompts without a terminal.

use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};

/// Asks the operator a yes/no question.
pub trait Confirm {
    /// Presents `message` and waits for an answer.
    ///
    /// # Errors
    ///
    /// Returns an IO error when the question cannot be written or the answer
    /// cannot be read.
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// Line-oriented prompt over arbitrary streams.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Creates a prompt reading answers from `reader` and writing questions
    /// to `writer`.
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl TerminalPrompt<BufReader<Stdin>, Stderr> {
    /// Creates a prompt bound to stdin and stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        let mut answer = String::new();
        loop {
            write!(self.writer, "{message} [y/n] ")?;
            self.writer.flush()?;

            answer.clear();
            if self.reader.read_line(&mut answer)? == 0 {
                writeln!(self.writer)?;
                return Ok(false);
            }
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {}
            }
        }
    }
}

impl<C: Confirm + ?Sized> Confirm for &mut C {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        (**self).confirm(message)
    }
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        (**self).confirm(message)
    }
}

/// Asks `message` on stdin and stderr.
///
/// # Errors
///
/// Returns an IO error when the terminal cannot be read or written.
pub fn confirm(message: &str) -> io::Result<bool> {
    TerminalPrompt::stdio().confirm(message)
}
