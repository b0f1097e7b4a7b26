use crate::command::{ExecutableCommand, Status, Streams};
use crate::error::ShellError;
use crate::external::ExternalCommand;
use crate::io_adapters::LineSource;
use crate::lexer;
use crate::registry::Registry;

/// Prompt shown before every line.
pub const PROMPT: &str = "> ";

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter owns a [`Registry`] of builtins; anything the registry does not know
/// is launched as an external program. See [`Default`] for the builtins included out
/// of the box.
///
/// Example
/// ```
/// use lsh::Interpreter;
/// use lsh::command::{Status, Streams};
///
/// let sh = Interpreter::default();
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// let status = sh.execute(&["exit"], &mut Streams::new(&mut out, &mut err));
/// assert_eq!(status, Status::Terminate);
/// ```
pub struct Interpreter {
    registry: Registry,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of builtins.
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Dispatch one tokenized command.
    ///
    /// An empty sequence does nothing. Otherwise `args[0]` is matched against the builtins
    /// in registration order; the first exact match runs with the full sequence. Anything
    /// else is handed to the process launcher.
    pub fn execute(&self, args: &[&str], io: &mut Streams<'_>) -> Status {
        let Some(&name) = args.first() else {
            return Status::Continue;
        };

        let command: Box<dyn ExecutableCommand> = match self.registry.lookup(name) {
            Some(factory) => {
                tracing::debug!(command = name, "dispatching builtin");
                factory.create(args)
            }
            None => {
                tracing::debug!(command = name, "launching external program");
                Box::new(ExternalCommand::from_tokens(args))
            }
        };
        command.execute(io, &self.registry.names())
    }

    /// Tokenize and dispatch a single line.
    pub fn run_line(&self, line: &str, io: &mut Streams<'_>) -> Result<Status, ShellError> {
        let tokens = lexer::split_into_tokens(line)?;
        Ok(self.execute(&tokens, io))
    }

    /// Read-eval loop.
    ///
    /// Prompts, reads, tokenizes and dispatches until a command asks to terminate or
    /// the input ends; both are `Ok(())`. Errors are the conditions that should end
    /// the whole process with a failure status, which is left to the caller.
    pub fn repl(&self, source: &mut dyn LineSource, io: &mut Streams<'_>) -> Result<(), ShellError> {
        loop {
            let Some(line) = source.read_line(PROMPT)? else {
                tracing::debug!("end of input");
                return Ok(());
            };
            if self.run_line(&line, io)? == Status::Terminate {
                tracing::debug!("terminated by command");
                return Ok(());
            }
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default builtins: `cd`, `help`, `exit`.
    fn default() -> Self {
        Self::new(Registry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandFactory;
    use crate::io_adapters::PromptedLines;
    use crate::test_util::{lock_current_dir, make_unique_temp_dir};
    use std::env;
    use std::fs;
    use std::io::{self, BufReader, Cursor, Read};

    struct Outcome {
        status: Status,
        stdout: String,
        stderr: String,
    }

    fn dispatch(sh: &Interpreter, args: &[&str]) -> Outcome {
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();
        let status = sh.execute(args, &mut Streams::new(&mut out, &mut err));
        Outcome {
            status,
            stdout: String::from_utf8(out).unwrap(),
            stderr: String::from_utf8(err).unwrap(),
        }
    }

    #[test]
    fn test_empty_command_does_nothing() {
        let res = dispatch(&Interpreter::default(), &[]);
        assert_eq!(res.status, Status::Continue);
        assert!(res.stdout.is_empty());
        assert!(res.stderr.is_empty());
    }

    #[test]
    fn test_exit_terminates_with_trailing_args() {
        let sh = Interpreter::default();
        assert_eq!(dispatch(&sh, &["exit"]).status, Status::Terminate);
        assert_eq!(dispatch(&sh, &["exit", "1", "2"]).status, Status::Terminate);
    }

    #[test]
    fn test_cd_without_argument() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();

        let res = dispatch(&Interpreter::default(), &["cd"]);

        assert_eq!(res.status, Status::Continue);
        assert_eq!(res.stderr, "lsh: expected argument to \"cd\"\n");
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_changes_directory() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir("dispatch_cd").unwrap();
        let orig = env::current_dir().unwrap();

        let res = dispatch(&Interpreter::default(), &["cd", &temp.to_string_lossy()]);
        let now = env::current_dir().unwrap();
        env::set_current_dir(&orig).expect("failed to restore cwd");

        assert_eq!(res.status, Status::Continue);
        assert!(res.stderr.is_empty(), "unexpected diagnostic: {}", res.stderr);
        assert_eq!(
            fs::canonicalize(now).unwrap(),
            fs::canonicalize(&temp).unwrap()
        );
        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn test_cd_nonexistent_keeps_directory() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();
        let target = format!("/nonexistent_lsh_dir_{}", std::process::id());

        let res = dispatch(&Interpreter::default(), &["cd", &target]);

        assert_eq!(res.status, Status::Continue);
        assert!(res.stderr.starts_with("lsh: "), "got: {}", res.stderr);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_help_lists_names_in_order() {
        let res = dispatch(&Interpreter::default(), &["help"]);
        assert_eq!(res.status, Status::Continue);

        let cd = res.stdout.find("  cd\n").expect("cd listed");
        let help = res.stdout.find("  help\n").expect("help listed");
        let exit = res.stdout.find("  exit\n").expect("exit listed");
        assert!(cd < help && help < exit);
    }

    #[test]
    fn test_unknown_program_reports_and_continues() {
        let name = format!("lsh_missing_program_{}", std::process::id());
        let res = dispatch(&Interpreter::default(), &[name.as_str()]);
        assert_eq!(res.status, Status::Continue);
        assert!(res.stderr.starts_with("lsh: "), "got: {}", res.stderr);
    }

    #[test]
    #[cfg(unix)]
    fn test_child_exit_code_is_not_propagated() {
        let res = dispatch(&Interpreter::default(), &["false"]);
        assert_eq!(res.status, Status::Continue);
        assert!(res.stderr.is_empty());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let name_upper = "EXIT";
        let res = dispatch(&Interpreter::default(), &[name_upper]);
        // not the builtin, so it goes to the launcher and (normally) is not found
        assert_eq!(res.status, Status::Continue);
    }

    #[test]
    fn test_builtins_shadow_programs() {
        struct Shadow;
        impl ExecutableCommand for Shadow {
            fn execute(self: Box<Self>, io: &mut Streams<'_>, _: &[&'static str]) -> Status {
                io.report("shadowed");
                Status::Continue
            }
        }
        struct ShadowFactory;
        impl CommandFactory for ShadowFactory {
            fn name(&self) -> &'static str {
                "true"
            }
            fn create(&self, _args: &[&str]) -> Box<dyn ExecutableCommand> {
                Box::new(Shadow)
            }
        }

        let mut registry = Registry::default();
        registry.register(Box::new(ShadowFactory)).unwrap();
        let res = dispatch(&Interpreter::new(registry), &["true"]);
        assert_eq!(res.stderr, "lsh: shadowed\n");
    }

    #[test]
    fn test_run_line_tokenizes() {
        let sh = Interpreter::default();
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();
        let mut io = Streams::new(&mut out, &mut err);

        assert_eq!(sh.run_line(" \t\n", &mut io).unwrap(), Status::Continue);
        assert_eq!(sh.run_line("  exit  now\n", &mut io).unwrap(), Status::Terminate);
    }

    #[test]
    #[cfg(unix)]
    fn test_repl_cd_then_exit() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();
        let sh = Interpreter::default();
        let mut prompts = Vec::<u8>::new();
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();

        let res = {
            let mut source = PromptedLines::new(Cursor::new("cd /tmp\nexit\n"), &mut prompts);
            sh.repl(&mut source, &mut Streams::new(&mut out, &mut err))
        };
        let now = env::current_dir().unwrap();
        env::set_current_dir(&orig).expect("failed to restore cwd");

        assert!(res.is_ok());
        assert_eq!(prompts, b"> > ");
        assert!(out.is_empty());
        assert!(err.is_empty(), "unexpected diagnostic: {}", String::from_utf8_lossy(&err));
        assert_eq!(
            fs::canonicalize(now).unwrap(),
            fs::canonicalize("/tmp").unwrap()
        );
    }

    #[test]
    fn test_repl_stops_at_exit() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();
        let sh = Interpreter::default();
        let mut prompts = Vec::<u8>::new();
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();

        let res = {
            let input = "\n   \nexit\ncd /definitely/not/here\n";
            let mut source = PromptedLines::new(Cursor::new(input), &mut prompts);
            sh.repl(&mut source, &mut Streams::new(&mut out, &mut err))
        };

        assert!(res.is_ok());
        assert_eq!(prompts, b"> > > ");
        assert!(err.is_empty());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_repl_ends_at_eof() {
        let sh = Interpreter::default();
        let mut prompts = Vec::<u8>::new();
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();

        let res = {
            let mut source = PromptedLines::new(Cursor::new("help"), &mut prompts);
            sh.repl(&mut source, &mut Streams::new(&mut out, &mut err))
        };

        assert!(res.is_ok());
        assert_eq!(prompts, b"> > ");
        assert!(String::from_utf8(out).unwrap().contains("Builtins:"));
    }

    #[test]
    fn test_repl_read_failure_is_fatal() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }

        let sh = Interpreter::default();
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();
        let mut source = PromptedLines::new(BufReader::new(Broken), Vec::<u8>::new());

        let res = sh.repl(&mut source, &mut Streams::new(&mut out, &mut err));

        match res {
            Err(e @ ShellError::Read(_)) => assert_eq!(e.to_string(), "readline: device gone"),
            other => panic!("expected read error, got {:?}", other),
        }
    }
}
