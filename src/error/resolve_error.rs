#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors found by the static scope pass.
///
/// These are reported like syntax errors: the program is not evaluated,
/// but the pass keeps walking so every problem is reported at once.
pub enum ResolveError {
    /// A name was declared twice in the same scope.
    AlreadyDeclared {
        /// The declared name.
        name: String,
        /// The source line of the second declaration.
        line: usize,
    },
    /// A local variable was read inside its own initializer.
    ReadInOwnInitializer {
        /// The variable name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `return` appeared outside any function body.
    ReturnOutsideFunction {
        /// The source line of the `return`.
        line: usize,
    },
}

impl ResolveError {
    /// The source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::AlreadyDeclared { line, .. }
            | Self::ReadInOwnInitializer { line, .. }
            | Self::ReturnOutsideFunction { line } => *line,
        }
    }
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyDeclared { name, line } => write!(f,
                                                           "Error on line {line}: Variable '{name}' is already declared in this scope."),
            Self::ReadInOwnInitializer { name, line } => write!(f,
                                                                "Error on line {line}: Cannot read local variable '{name}' in its own initializer."),
            Self::ReturnOutsideFunction { line } => {
                write!(f, "Error on line {line}: Cannot return from top-level code.")
            },
        }
    }
}

impl std::error::Error for ResolveError {}
