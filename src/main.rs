use std::{fs, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use clara::{Error, Session, Status, ast::printer, command::ConsoleModule};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Exit status for scripts with lexical, syntax or resolution errors.
const EX_DATAERR: u8 = 65;
/// Exit status when the script file cannot be read.
const EX_NOINPUT: u8 = 66;
/// Exit status for scripts that fail at runtime.
const EX_SOFTWARE: u8 = 70;

/// clara is an embeddable scripting language with a shell-like command
/// grammar. Without a file or `--eval` it starts an interactive shell.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to run.
    file: Option<PathBuf>,

    /// Runs the given script text instead of a file.
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Prints the parsed program as prefix text instead of running it.
    #[arg(long)]
    print_ast: bool,

    /// Raises log verbosity on stderr. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Does not echo received commands to the console.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut session = Session::new();
    if !args.quiet {
        session.install(Box::new(ConsoleModule::new()));
    }

    let script = match (&args.file, args.eval) {
        (Some(path), _) => match fs::read_to_string(path) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          path.display());
                return ExitCode::from(EX_NOINPUT);
            },
        },
        (None, Some(script)) => script,
        (None, None) => return repl(&mut session),
    };

    if args.print_ast {
        return print_ast(&mut session, &script);
    }

    match session.run(&script) {
        Ok(status) => status_code(status),
        Err(errors) => {
            report(&errors);
            failure_code(&errors)
        },
    }
}

/// Logs go to stderr so they never mix with program output. `RUST_LOG`
/// takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("clara={level}")));

    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                    .with_target(false))
                                  .with(filter)
                                  .init();
}

fn repl(session: &mut Session) -> ExitCode {
    session.set_command_mode(true);

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to start the interactive shell: {e}");
            return ExitCode::FAILURE;
        },
    };

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                match session.run(&line) {
                    Ok(Status::Completed) => {},
                    Ok(status @ Status::Exit(_)) => return status_code(status),
                    Err(errors) => report(&errors),
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            },
        }
    }
}

fn print_ast(session: &mut Session, script: &str) -> ExitCode {
    match session.parse(script) {
        Ok(statements) => {
            println!("{}", printer::program(&statements));
            ExitCode::SUCCESS
        },
        Err(errors) => {
            report(&errors);
            ExitCode::from(EX_DATAERR)
        },
    }
}

fn report(errors: &[Error]) {
    for error in errors {
        eprintln!("{error}");
    }
}

fn status_code(status: Status) -> ExitCode {
    match status {
        Status::Completed => ExitCode::SUCCESS,
        Status::Exit(code) => u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from),
    }
}

fn failure_code(errors: &[Error]) -> ExitCode {
    if errors.iter().any(Error::is_runtime) {
        ExitCode::from(EX_SOFTWARE)
    } else {
        ExitCode::from(EX_DATAERR)
    }
}
