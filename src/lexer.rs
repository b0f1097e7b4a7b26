//! Lexical analysis for command lines.
//!
//! A line is split on a fixed delimiter set into words. There is no quoting,
//! escaping or substitution: every maximal run of non-delimiter characters is one token.

use std::collections::TryReserveError;
use std::fmt;

/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Initial token capacity and the increment the buffer grows by.
const TOKEN_CHUNK: usize = 64;

/// Errors that can occur during the lexical analysis process.
#[derive(Debug)]
pub enum LexingError {
    /// The token buffer could not grow.
    OutOfMemory(TryReserveError),
}

impl fmt::Display for LexingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexingError::OutOfMemory(_) => write!(f, "allocation error"),
        }
    }
}

impl std::error::Error for LexingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LexingError::OutOfMemory(e) => Some(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord(usize), // byte offset where the word began
}

struct LexingFSM<'a> {
    input: &'a str,
    state: LexingState,
    tokens: Vec<&'a str>,
}

impl<'a> LexingFSM<'a> {
    fn new(input: &'a str) -> Result<Self, LexingError> {
        let mut tokens = Vec::new();
        tokens
            .try_reserve_exact(TOKEN_CHUNK)
            .map_err(LexingError::OutOfMemory)?;
        Ok(LexingFSM {
            input,
            state: LexingState::Start,
            tokens,
        })
    }

    /// Runs the state machine over the whole input and returns the collected tokens.
    fn make_tokens(mut self) -> Result<Vec<&'a str>, LexingError> {
        let input = self.input;
        for (pos, ch) in input.char_indices() {
            match self.state {
                LexingState::Start => self.handle_start(pos, ch),
                LexingState::ReadingWord(start) => self.handle_word(start, pos, ch)?,
            }
        }

        // Input may end in the middle of a word
        if let LexingState::ReadingWord(start) = self.state {
            self.push(&input[start..])?;
        }

        Ok(self.tokens)
    }

    fn handle_start(&mut self, pos: usize, ch: char) {
        if !is_delimiter(ch) {
            self.state = LexingState::ReadingWord(pos);
        }
    }

    fn handle_word(&mut self, start: usize, pos: usize, ch: char) -> Result<(), LexingError> {
        if is_delimiter(ch) {
            let input = self.input;
            self.push(&input[start..pos])?;
            self.state = LexingState::Start;
        }
        Ok(())
    }

    /// Appends a token, growing the buffer by a fixed increment when it is full.
    fn push(&mut self, token: &'a str) -> Result<(), LexingError> {
        if self.tokens.len() == self.tokens.capacity() {
            self.tokens
                .try_reserve_exact(TOKEN_CHUNK)
                .map_err(LexingError::OutOfMemory)?;
        }
        self.tokens.push(token);
        Ok(())
    }
}

fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Splits `line` into tokens borrowed from it.
///
/// An empty or all-delimiter line gives an empty vector. The only failure is the token
/// buffer being unable to grow, which callers treat as fatal.
pub fn split_into_tokens(line: &str) -> Result<Vec<&str>, LexingError> {
    LexingFSM::new(line)?.make_tokens()
}
