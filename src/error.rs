use crate::lexer::LexingError;
use std::fmt;
use std::io;

/// Errors that end the read-eval loop.
///
/// Everything recoverable is reported where it happens and never becomes a `ShellError`;
/// these are the conditions the loop cannot continue past. `main` turns them into a
/// diagnostic and a failing exit code.
#[derive(Debug)]
pub enum ShellError {
    /// Reading a command line failed for a reason other than end-of-input.
    Read(io::Error),
    /// The prompt could not be written.
    Output(io::Error),
    /// The token buffer could not grow.
    Alloc(LexingError),
    /// The line editor saw an interrupt (Ctrl-C) while reading.
    Interrupted,
}

impl ShellError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            // 128 + SIGINT, what the default disposition would have produced
            ShellError::Interrupted => 130,
            _ => 1,
        }
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Read(e) => write!(f, "readline: {}", e),
            ShellError::Output(e) => write!(f, "stdout: {}", e),
            ShellError::Alloc(e) => write!(f, "{}", e),
            ShellError::Interrupted => write!(f, "interrupted"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Read(e) | ShellError::Output(e) => Some(e),
            ShellError::Alloc(e) => Some(e),
            ShellError::Interrupted => None,
        }
    }
}

impl From<LexingError> for ShellError {
    fn from(e: LexingError) -> Self {
        ShellError::Alloc(e)
    }
}
