use std::io::{self, Write};

use crate::{
    ast::Stmt,
    command::{CommandDistributor, ModuleRegistry},
    error::RuntimeError,
    interpreter::{
        environment::{CapturedScopes, EnvRef, Environment},
        resolver::Resolutions,
        value::{core::Value, function::install_natives},
    },
};

/// Deepest nesting of function calls before `StackOverflow` is reported.
pub const MAX_CALL_DEPTH: usize = 4096;

/// Result type used by the evaluator.
///
/// Evaluation stops early either on a runtime error or when a command asks
/// for termination.
pub type EvalResult<T> = Result<T, Halt>;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Carry on with the next statement.
    Next,
    /// A `return` is unwinding to the enclosing call.
    Return(Value),
}

/// Abrupt termination of an `interpret` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// A runtime error.
    Error(RuntimeError),
    /// `exit` was evaluated.
    Exit(i32),
}

impl From<RuntimeError> for Halt {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// How an `interpret` call ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every statement ran.
    Completed,
    /// `exit` stopped evaluation; the host should terminate with this
    /// status.
    Exit(i32),
}

/// Stores the runtime evaluation state.
///
/// ## Usage
///
/// An `Interpreter` is created once and reused for every input of a
/// session. Globals, function values and resolution distances carry over
/// from one `interpret` call to the next.
pub struct Interpreter {
    /// The outermost scope. Unresolved names are looked up here.
    pub(crate) globals:     EnvRef,
    /// The scope statements currently execute in.
    pub(crate) environment: EnvRef,
    /// Scope distances for every resolved variable reference.
    pub(crate) resolutions: Resolutions,
    pub(crate) distributor: CommandDistributor,
    pub(crate) output:      Box<dyn Write>,
    /// Calls currently in progress.
    pub(crate) call_depth:  usize,
    /// Local scopes captured by function declarations.
    pub(crate) captured:    CapturedScopes,
}

impl Interpreter {
    /// Creates an interpreter printing to standard output.
    #[must_use]
    pub fn new(registry: ModuleRegistry) -> Self {
        Self::with_output(registry, Box::new(io::stdout()))
    }

    /// Creates an interpreter printing to `output`.
    ///
    /// The global scope starts with the built-in functions.
    #[must_use]
    pub fn with_output(registry: ModuleRegistry, output: Box<dyn Write>) -> Self {
        let globals = Environment::global();
        install_natives(&globals);

        Self { environment: globals.clone(),
               globals,
               resolutions: Resolutions::new(),
               distributor: CommandDistributor::new(registry),
               output,
               call_depth: 0,
               captured: CapturedScopes::default() }
    }

    /// Adds resolution distances produced by the resolver.
    pub fn resolve(&mut self, resolutions: Resolutions) {
        self.resolutions.extend(resolutions);
    }

    /// Executes `statements` in order in the global scope.
    ///
    /// A runtime error stops the remaining statements of this call and is
    /// returned; the interpreter stays usable for the next call. `exit`
    /// stops the remaining statements too and is reported as
    /// [`Status::Exit`].
    ///
    /// Afterwards, captured scopes that no global can reach any more are
    /// released, together with the functions that captured them.
    ///
    /// # Example
    /// ```
    /// use clara::{
    ///     command::ModuleRegistry,
    ///     interpreter::evaluator::core::{Interpreter, Status},
    /// };
    ///
    /// let mut interpreter = Interpreter::new(ModuleRegistry::new());
    /// assert_eq!(interpreter.interpret(&[]), Ok(Status::Completed));
    /// ```
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<Status, RuntimeError> {
        let outcome = self.execute_top_level(statements);
        if !self.captured.is_empty() {
            self.collect_scopes();
        }
        let flushed = self.output.flush();

        let status = outcome?;
        flushed.map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                   line:    0, })?;
        Ok(status)
    }

    fn execute_top_level(&mut self, statements: &[Stmt]) -> Result<Status, RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(_) => {
                    if self.captured.is_due() {
                        self.collect_scopes();
                    }
                },
                Err(Halt::Exit(code)) => return Ok(Status::Exit(code)),
                Err(Halt::Error(error)) => {
                    tracing::debug!(%error, "evaluation aborted");
                    return Err(error);
                },
            }
        }
        Ok(Status::Completed)
    }

    /// Breaks the reference cycles of captured scopes that are no longer
    /// reachable. Only valid between top-level statements, when no scope is
    /// in use on the call stack.
    fn collect_scopes(&mut self) {
        let freed = self.captured.collect(&[&self.globals, &self.environment]);
        if freed > 0 {
            tracing::debug!(freed, tracked = self.captured.len(), "released unreachable scopes");
        }
    }

    /// The global scope.
    #[must_use]
    pub const fn globals(&self) -> &EnvRef {
        &self.globals
    }

    /// The registered modules.
    #[must_use]
    pub const fn registry(&self) -> &ModuleRegistry {
        self.distributor.registry()
    }

    /// The registered modules, for registration.
    pub const fn registry_mut(&mut self) -> &mut ModuleRegistry {
        self.distributor.registry_mut()
    }
}
