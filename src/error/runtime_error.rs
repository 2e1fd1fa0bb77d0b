#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// A runtime error stops the statements left in the current `interpret`
/// call. The interpreter itself stays usable for the next call.
pub enum RuntimeError {
    /// Read or assigned a variable that was never defined.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A unary operator was applied to something that is not a number.
    OperandMustBeNumber {
        /// The operator, as written.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A binary operator needs two numbers.
    OperandsMustBeNumbers {
        /// The operator, as written.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `+` was applied to a mix of numbers, strings or other values.
    OperandsMustBeNumbersOrStrings {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The callee of a call is not a function.
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function was called with the wrong number of arguments.
    ArityMismatch {
        /// The number of declared parameters.
        expected: usize,
        /// The number of arguments passed.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A built-in function failed.
    NativeFailure {
        /// The name of the built-in.
        name:    String,
        /// What went wrong.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Writing program output failed.
    Output {
        /// The underlying I/O error message.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Calls nested deeper than the interpreter allows.
    StackOverflow {
        /// The source line of the call that went too deep.
        line: usize,
    },
}

impl RuntimeError {
    /// The source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::OperandMustBeNumber { line, .. }
            | Self::OperandsMustBeNumbers { line, .. }
            | Self::OperandsMustBeNumbersOrStrings { line }
            | Self::NotCallable { line }
            | Self::ArityMismatch { line, .. }
            | Self::NativeFailure { line, .. }
            | Self::Output { line, .. }
            | Self::StackOverflow { line } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::OperandMustBeNumber { operator, line } => {
                write!(f, "Error on line {line}: Operand of '{operator}' must be a number.")
            },
            Self::OperandsMustBeNumbers { operator, line } => {
                write!(f, "Error on line {line}: Operands of '{operator}' must be numbers.")
            },
            Self::OperandsMustBeNumbersOrStrings { line } => write!(f,
                                                                    "Error on line {line}: Operands must be two numbers or two strings."),
            Self::NotCallable { line } => {
                write!(f, "Error on line {line}: Can only call functions.")
            },
            Self::ArityMismatch { expected,
                                  found,
                                  line, } => write!(f,
                                                    "Error on line {line}: Expected {expected} arguments but got {found}."),
            Self::NativeFailure { name,
                                  details,
                                  line, } => {
                write!(f, "Error on line {line}: Built-in '{name}' failed: {details}.")
            },
            Self::Output { details, line } => {
                write!(f, "Error on line {line}: Could not write output: {details}.")
            },
            Self::StackOverflow { line } => write!(f, "Error on line {line}: Stack overflow."),
        }
    }
}

impl std::error::Error for RuntimeError {}
