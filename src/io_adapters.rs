//! Line sources for the read-eval loop.
//!
//! [`PromptedLines`] reads from any buffered reader and is used for pipes, files and
//! tests. [`Editor`] wraps rustyline for interactive terminals.

use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};

/// Something the loop can pull command lines from.
pub trait LineSource {
    /// Show `prompt` and read one line.
    ///
    /// Returns `Ok(None)` on clean end-of-input. A final line without a trailing
    /// newline is still returned as a line.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;
}

/// Reads lines from `reader`, writing the prompt to `prompt_out` before each one.
pub struct PromptedLines<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> PromptedLines<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for PromptedLines<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        self.prompt_out
            .write_all(prompt.as_bytes())
            .and_then(|_| self.prompt_out.flush())
            .map_err(ShellError::Output)?;

        let mut buf = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut buf)
            .map_err(ShellError::Read)?;
        if n == 0 {
            return Ok(None);
        }
        // Bytes that are not UTF-8 still make it to the tokenizer.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Interactive line editing on a terminal.
///
/// Nothing is added to rustyline's history.
pub struct Editor {
    inner: DefaultEditor,
}

impl Editor {
    pub fn new() -> Result<Self, ShellError> {
        let inner = DefaultEditor::new().map_err(readline_error)?;
        Ok(Self { inner })
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.inner.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(readline_error(err)),
        }
    }
}

fn readline_error(err: ReadlineError) -> ShellError {
    match err {
        ReadlineError::Interrupted => ShellError::Interrupted,
        ReadlineError::Io(e) => ShellError::Read(e),
        other => ShellError::Read(io::Error::other(other.to_string())),
    }
}
