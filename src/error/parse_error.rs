#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token stream.
///
/// Parse errors never stop the parser on their own: the statement being
/// parsed is abandoned, the parser synchronizes on the next statement
/// boundary and keeps going so that every error in a script is reported.
pub enum ParseError {
    /// A specific token was required but something else was found.
    Expected {
        /// What the grammar required at this point.
        expected: &'static str,
        /// The lexeme that was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An expression was required but the token cannot start one.
    ExpectedExpression {
        /// The lexeme that was found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfInput {
        /// What the grammar required at this point.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The left side of `=` is not a variable.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call has more than 255 arguments.
    TooManyArguments {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function declares more than 255 parameters.
    TooManyParameters {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Expressions or statements nest deeper than the parser allows.
    TooDeeplyNested {
        /// The source line where the limit was reached.
        line: usize,
    },
    /// `help` was followed by something that is not a command word.
    NoSuchCommand {
        /// The word that was asked about.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `-` inside a command was not followed by a name.
    FlagMustBeIdentifier {
        /// The lexeme after the `-`.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `--` inside a command was not followed by a name.
    ParameterMustBeIdentifier {
        /// The lexeme after the `--`.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A token inside a command that cannot start an argument.
    InvalidCommandArgument {
        /// The offending lexeme.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl ParseError {
    /// The source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Expected { line, .. }
            | Self::ExpectedExpression { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::TooManyArguments { line }
            | Self::TooManyParameters { line }
            | Self::TooDeeplyNested { line }
            | Self::NoSuchCommand { line, .. }
            | Self::FlagMustBeIdentifier { line, .. }
            | Self::ParameterMustBeIdentifier { line, .. }
            | Self::InvalidCommandArgument { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expected { expected,
                             found,
                             line, } => {
                write!(f, "Error on line {line}: Expected {expected} but found '{found}'.")
            },
            Self::ExpectedExpression { found, line } => {
                write!(f, "Error on line {line}: Expected expression but found '{found}'.")
            },
            Self::UnexpectedEndOfInput { expected, line } => {
                write!(f, "Error on line {line}: Unexpected end of input, expected {expected}.")
            },
            Self::InvalidAssignmentTarget { line } => {
                write!(f, "Error on line {line}: Invalid assignment target.")
            },
            Self::TooManyArguments { line } => {
                write!(f, "Error on line {line}: Cannot have more than 255 arguments.")
            },
            Self::TooManyParameters { line } => {
                write!(f, "Error on line {line}: Cannot have more than 255 parameters.")
            },
            Self::TooDeeplyNested { line } => {
                write!(f, "Error on line {line}: Too deeply nested.")
            },
            Self::NoSuchCommand { found, line } => {
                write!(f, "Error on line {line}: No such command '{found}'.")
            },
            Self::FlagMustBeIdentifier { found, line } => write!(f,
                                                                 "Error on line {line}: Flag must be an identifier, found '{found}'."),
            Self::ParameterMustBeIdentifier { found, line } => write!(f,
                                                                      "Error on line {line}: Parameter must be an identifier, found '{found}'."),
            Self::InvalidCommandArgument { found, line } => {
                write!(f, "Error on line {line}: '{found}' is not a valid command argument.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
