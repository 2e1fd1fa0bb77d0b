use std::io::{self, Write};

use crate::command::{
    map::CommandMap,
    module::{Module, Reception},
};

/// The command words the console accepts.
const CONSOLE_COMMANDS: &[&str] = &["create", "start", "end", "finish", "begin", "react",
                                    "reaction", "scheme", "open", "close", "command"];

/// Prints every command it receives as `command {map}`.
///
/// Stands in for domain modules in the interactive shell, so users can see
/// exactly what a command evaluates to.
pub struct ConsoleModule {
    out: Box<dyn Write>,
}

impl ConsoleModule {
    /// A console printing to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// A console printing to `out`.
    #[must_use]
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Self { out }
    }
}

impl Default for ConsoleModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for ConsoleModule {
    fn name(&self) -> &str {
        "console"
    }

    fn commands(&self) -> &[&str] {
        CONSOLE_COMMANDS
    }

    fn receive(&mut self, command: &str, map: &CommandMap) -> Reception {
        match writeln!(self.out, "{command} {map}") {
            Ok(()) => Reception::Accepted,
            Err(e) => Reception::Refused(e.to_string()),
        }
    }
}
