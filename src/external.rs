use crate::command::{ExecutableCommand, Status, Streams};
use std::ffi::{OsStr, OsString};
use std::io;
use std::process::{Command, ExitStatus};

/// Command that is not a builtin.
///
/// The program is resolved through `PATH` by the platform when it is a bare name,
/// and used as given when it contains a path separator.
pub struct ExternalCommand {
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: OsString, args: Vec<OsString>) -> Self {
        Self { name, args }
    }

    /// Build from a token sequence: `args[0]` is the program, the rest its arguments.
    pub fn from_tokens(args: &[&str]) -> Self {
        let mut args = args.iter().map(OsString::from);
        let name = args.next().unwrap_or_default();
        Self::new(name, args.collect())
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(self: Box<Self>, io: &mut Streams<'_>, _builtins: &[&'static str]) -> Status {
        // Anything still buffered must reach the terminal before the child writes.
        if let Err(e) = io.stdout.flush() {
            tracing::warn!(error = %e, "failed to flush stdout before launch");
        }
        match run_to_completion(&self.name, &self.args) {
            Ok(status) => tracing::debug!(
                program = %self.name.to_string_lossy(),
                status = %describe(status),
                "child finished"
            ),
            Err(e) => {
                tracing::debug!(program = %self.name.to_string_lossy(), error = %e, "launch failed");
                io.report(e);
            }
        }
        Status::Continue
    }
}

/// Run `program` with `args` as a child process and block until it is gone.
///
/// The child inherits stdin, stdout, stderr, the environment and the working directory.
/// Returns once the child has exited or been killed by a signal: `Child::wait` does not
/// ask for stop notifications, so a stopped child keeps the caller blocked. Failing to
/// start the program (not found, not executable, out of processes) is an `Err` in the
/// parent; the child never falls back into shell code.
pub fn run_to_completion(program: &OsStr, args: &[OsString]) -> io::Result<ExitStatus> {
    let mut child = Command::new(program).args(args).spawn()?;
    tracing::debug!(pid = child.id(), "spawned child");
    child.wait()
}

#[cfg(unix)]
fn describe(status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;
    if let Some(code) = status.code() {
        format!("exited with {}", code)
    } else if let Some(signal) = status.signal() {
        if status.core_dumped() {
            format!("killed by signal {} (core dumped)", signal)
        } else {
            format!("killed by signal {}", signal)
        }
    } else {
        status.to_string()
    }
}

#[cfg(not(unix))]
fn describe(status: ExitStatus) -> String {
    status.to_string()
}
