/// Lexical errors.
///
/// Errors raised while scanning source text: characters the language does
/// not know and string literals left open at the end of input. Neither stops
/// the scan.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning tokens into
/// statements, including the command sub-grammar.
pub mod parse_error;
/// Scope resolution errors.
///
/// Raised by the static pass that binds variable references to their
/// declarations: duplicate declarations, reads in an initializer and
/// misplaced `return` statements.
pub mod resolve_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// type mismatches, undefined variables and arity mismatches.
pub mod runtime_error;
/// The error-reporting sink.
pub mod diagnostics;

pub use diagnostics::Diagnostics;
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use resolve_error::ResolveError;
pub use runtime_error::RuntimeError;

/// Any error a run of the pipeline can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Raised by the lexer.
    Lex(LexError),
    /// Raised by the parser.
    Parse(ParseError),
    /// Raised by the resolver.
    Resolve(ResolveError),
    /// Raised while evaluating.
    Runtime(RuntimeError),
}

impl Error {
    /// The source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line(),
            Self::Parse(e) => e.line(),
            Self::Resolve(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }

    /// Whether the error was raised during evaluation rather than before it.
    #[must_use]
    pub const fn is_runtime(&self) -> bool {
        matches!(self, Self::Runtime(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Resolve(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Resolve(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Lex(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<ResolveError> for Error {
    fn from(error: ResolveError) -> Self {
        Self::Resolve(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}
