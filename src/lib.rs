//! A tiny interactive command interpreter.
//!
//! Each line read from the user is split into whitespace-separated tokens. The first
//! token names either a builtin (`cd`, `help`, `exit`) or an external program, which is
//! started as a child process and waited for before the next prompt. There is no quoting,
//! no pipes, no redirection and no variable expansion.
//!
//! The main entry point is [`Interpreter`]: [`Interpreter::execute`] dispatches an
//! already tokenized command and [`Interpreter::repl`] drives the prompt loop over any
//! [`io_adapters::LineSource`].

mod builtin;
pub mod command;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod logging;
pub mod registry;

pub use error::ShellError;
pub use external::{ExternalCommand, run_to_completion};
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, PROMPT};
