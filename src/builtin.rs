use crate::command::{ExecutableCommand, Status, Streams};
use anyhow::Result;
use argh::FromArgs;
use std::env;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process. Their arguments are positional only:
/// nothing after the command name is read as a flag or a help request.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    /// Executes the command.
    ///
    /// `builtins` holds every registered builtin name in registration order.
    fn execute(self, io: &mut Streams<'_>, builtins: &[&'static str]) -> Result<Status>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, io: &mut Streams<'_>, builtins: &[&'static str]) -> Status {
        match <T as BuiltinCommand>::execute(*self, io, builtins) {
            Ok(status) => status,
            Err(e) => {
                io.report(format_args!("{:#}", e));
                Status::Continue
            }
        }
    }
}

/// Stand-in for a builtin whose arguments argh refused.
pub(crate) struct InvalidArgs {
    pub(crate) output: String,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, io: &mut Streams<'_>, _builtins: &[&'static str]) -> Status {
        io.report(self.output.trim_end());
        Status::Continue
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional, greedy)]
    /// directory to switch to; absolute or relative. Anything after it is ignored.
    pub dir: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, io: &mut Streams<'_>, _builtins: &[&'static str]) -> Result<Status> {
        match self.dir.first() {
            Some(target) => {
                env::set_current_dir(target)?;
                tracing::debug!(dir = %target, "changed directory");
            }
            None => io.report("expected argument to \"cd\""),
        }
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// List the builtin commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, io: &mut Streams<'_>, builtins: &[&'static str]) -> Result<Status> {
        writeln!(io.stdout, "Stephen Brennan's LSH (lab version)")?;
        writeln!(io.stdout, "Type program names and arguments, then hit enter.")?;
        writeln!(io.stdout, "Builtins:")?;
        for name in builtins {
            writeln!(io.stdout, "  {}", name)?;
        }
        writeln!(io.stdout, "Use the man command for info on other programs.")?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Exit the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored; the shell always exits with success.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _io: &mut Streams<'_>, _builtins: &[&'static str]) -> Result<Status> {
        Ok(Status::Terminate)
    }
}
