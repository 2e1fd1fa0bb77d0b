use std::io::{self, Write};

use crate::{
    ast::{NodeIds, Stmt},
    command::{Module, ModuleRegistry},
    error::{Diagnostics, Error},
    interpreter::{
        evaluator::core::{Interpreter, Status},
        lexer::lex,
        parser::parse,
        resolver::resolve,
        token::CommandWords,
    },
};

/// Everything that persists between inputs of one host.
///
/// A session owns the node id allocator, the command words, the module
/// registry (through its interpreter) and the error sink. A REPL feeds every
/// line to the same session, so variables and functions defined on one line
/// are visible on the next.
pub struct Session {
    ids:          NodeIds,
    words:        CommandWords,
    interpreter:  Interpreter,
    diagnostics:  Diagnostics,
    command_mode: bool,
}

impl Session {
    /// Creates a session printing to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Creates a session printing to `output`.
    #[must_use]
    pub fn with_output(output: Box<dyn Write>) -> Self {
        let registry = ModuleRegistry::new();
        Self { ids:          NodeIds::new(),
               words:        registry.command_words(),
               interpreter:  Interpreter::with_output(registry, output),
               diagnostics:  Diagnostics::new(),
               command_mode: false, }
    }

    /// Switches command mode, in which `print` and commands may omit the
    /// final `;`.
    pub const fn set_command_mode(&mut self, command_mode: bool) {
        self.command_mode = command_mode;
    }

    /// Registers a module and makes its command words known to the lexer.
    pub fn register(&mut self, name: impl Into<String>, module: Box<dyn Module>) {
        let registry = self.interpreter.registry_mut();
        registry.register(name, module);
        self.words = registry.command_words();
    }

    /// Registers a module under its own [`Module::name`].
    pub fn install(&mut self, module: Box<dyn Module>) {
        let registry = self.interpreter.registry_mut();
        registry.install(module);
        self.words = registry.command_words();
    }

    /// The command words currently recognized.
    #[must_use]
    pub const fn command_words(&self) -> &CommandWords {
        &self.words
    }

    /// The error sink of the last run.
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Lexes and parses `source` without evaluating it.
    ///
    /// # Errors
    /// Every lexical and syntax error found.
    pub fn parse(&mut self, source: &str) -> Result<Vec<Stmt>, Vec<Error>> {
        self.diagnostics.clear();
        let statements = self.front_end(source);
        if self.diagnostics.had_error() {
            return Err(self.diagnostics.take());
        }
        Ok(statements)
    }

    /// Runs `source`: lex, parse, resolve, interpret.
    ///
    /// Any lexical, syntax or resolution error suppresses evaluation of the
    /// whole input. A runtime error stops the remaining statements.
    ///
    /// # Errors
    /// Every error reported for this input.
    ///
    /// # Example
    /// ```
    /// use clara::{Session, Status};
    ///
    /// let mut session = Session::with_output(Box::new(std::io::sink()));
    /// assert_eq!(session.run("var a = 1;"), Ok(Status::Completed));
    /// assert_eq!(session.run("print a + 1; exit; print 0;"), Ok(Status::Exit(0)));
    /// assert!(session.run("print b;").is_err());
    /// assert!(session.diagnostics().had_runtime_error());
    /// ```
    pub fn run(&mut self, source: &str) -> Result<Status, Vec<Error>> {
        self.diagnostics.clear();

        let statements = self.front_end(source);
        if self.diagnostics.had_error() {
            return Err(self.diagnostics.take());
        }

        match resolve(&statements) {
            Ok(resolutions) => self.interpreter.resolve(resolutions),
            Err(errors) => {
                for error in errors {
                    self.diagnostics.report(error);
                }
                return Err(self.diagnostics.take());
            },
        }

        match self.interpreter.interpret(&statements) {
            Ok(status) => Ok(status),
            Err(error) => {
                self.diagnostics.report(error);
                Err(self.diagnostics.take())
            },
        }
    }

    /// Lexes and parses, reporting every error found on the way.
    fn front_end(&mut self, source: &str) -> Vec<Stmt> {
        let lexed = lex(source, &self.words);
        for error in lexed.errors {
            self.diagnostics.report(error);
        }

        match parse(&lexed.tokens, &mut self.ids, self.command_mode) {
            Ok(statements) => statements,
            Err(errors) => {
                for error in errors {
                    self.diagnostics.report(error);
                }
                Vec::new()
            },
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `source` once in a fresh session printing to standard output.
///
/// # Errors
/// Every error reported while running `source`.
///
/// # Examples
/// ```
/// use clara::run;
///
/// assert!(run("var x = 2 * 3;").is_ok());
/// assert!(run("print undefined;").is_err());
/// assert!(run("var = ;").is_err());
/// ```
pub fn run(source: &str) -> Result<Status, Vec<Error>> {
    Session::new().run(source)
}
