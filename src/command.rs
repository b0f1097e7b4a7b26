use std::fmt::Display;
use std::io::Write;

/// Loop continuation flag produced by every dispatched command.
///
/// The read-eval loop keeps prompting while commands return [`Status::Continue`]
/// and stops as soon as one returns [`Status::Terminate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Keep reading commands.
    Continue,
    /// Stop the shell.
    Terminate,
}

/// Output streams handed to commands during execution.
///
/// The interpreter passes the process stdout/stderr here; tests pass in-memory buffers.
pub struct Streams<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

impl<'a> Streams<'a> {
    pub fn new(stdout: &'a mut dyn Write, stderr: &'a mut dyn Write) -> Self {
        Self { stdout, stderr }
    }

    /// Writes an `lsh:`-prefixed diagnostic line to stderr.
    pub fn report(&mut self, message: impl Display) {
        if let Err(e) = writeln!(self.stderr, "lsh: {}", message) {
            tracing::warn!(error = %e, "failed to write diagnostic");
        }
    }
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// This is implemented by built-ins via a blanket impl and by external commands.
/// Errors never escape: whatever goes wrong is reported on `stderr` at the point
/// of detection and the command still yields a [`Status`].
pub trait ExecutableCommand {
    /// Executes the command.
    ///
    /// `builtins` lists the registered builtin names in registration order.
    fn execute(self: Box<Self>, io: &mut Streams<'_>, builtins: &[&'static str]) -> Status;
}

/// Factory that creates a command from its full token sequence.
///
/// `args[0]` is always the command name itself.
pub trait CommandFactory {
    /// Name this factory answers to. Matched exactly and case-sensitively.
    fn name(&self) -> &'static str;

    /// Create a command instance for the provided tokens.
    fn create(&self, args: &[&str]) -> Box<dyn ExecutableCommand>;
}
