use lsh::command::Streams;
use lsh::io_adapters::{Editor, LineSource, PromptedLines};
use lsh::{Interpreter, ShellError, logging};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

// Command-line arguments are not inspected.
fn main() -> ExitCode {
    logging::init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "shell terminated");
            eprintln!("lsh: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), ShellError> {
    let shell = Interpreter::default();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut streams = Streams::new(&mut stdout, &mut stderr);

    let mut source: Box<dyn LineSource> = if io::stdin().is_terminal() {
        Box::new(Editor::new()?)
    } else {
        Box::new(PromptedLines::new(io::stdin().lock(), io::stdout()))
    };
    shell.repl(source.as_mut(), &mut streams)
}
