use std::rc::Rc;

use crate::interpreter::token::{Literal, Token};

/// Renders syntax trees as parenthesised prefix text.
///
/// Used by the `--print-ast` option of the binary and by tests that check
/// the shape of parsed programs.
pub mod printer;

/// Identity of a resolvable expression node.
///
/// Ids are handed out by [`NodeIds`] while parsing and are never reused
/// within a session, so they can key the resolution side table even when
/// two nodes are structurally identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    /// The raw index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Allocator for [`ExprId`]s.
///
/// One allocator lives as long as the session that owns it. Parsing every
/// input of a REPL with the same allocator keeps ids unique across lines.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: u32,
}

impl NodeIds {
    /// Creates an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id.
    pub fn fresh(&mut self) -> ExprId {
        let id = ExprId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Every node owns its sub-expressions; there is no sharing between nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or `null`).
    Literal {
        /// The constant value.
        value: Literal,
        /// Line number in the source code.
        line:  usize,
    },
    /// A parenthesised expression.
    Grouping {
        /// The inner expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operation (`-x`, `!x`).
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// An arithmetic, comparison or equality operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A short-circuiting `and` / `or`.
    Logical {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand, evaluated only when the left one does not decide.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Resolution key.
        id:   ExprId,
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Assignment to an existing variable.
    Assign {
        /// Resolution key.
        id:    ExprId,
        /// Name of the assigned variable.
        name:  String,
        /// The new value.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A call, possibly chained (`f(1)(2)`).
    Call {
        /// The expression producing the callee.
        callee:    Box<Self>,
        /// Arguments in source order.
        arguments: Vec<Self>,
        /// Line of the closing parenthesis.
        line:      usize,
    },
    /// A command word used as an operand. Evaluates to the lower-cased word.
    CommandRef {
        /// The command word as written.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use clara::{ast::Expr, interpreter::token::Literal};
    ///
    /// let expr = Expr::Literal { value: Literal::Number(1.0),
    ///                            line:  5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Grouping { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Logical { line, .. }
            | Self::Variable { line, .. }
            | Self::Assign { line, .. }
            | Self::Call { line, .. }
            | Self::CommandRef { line, .. } => *line,
        }
    }
}

/// A user-defined function declaration.
///
/// Shared between the statement tree and every function value created from
/// it, so the body outlives the parse that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The name of the function.
    pub name:   String,
    /// The formal parameters in order.
    pub params: Vec<Token>,
    /// The statements of the body.
    pub body:   Vec<Stmt>,
    /// Line number of the name.
    pub line:   usize,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `{ ... }` opening a new scope.
    Block(Vec<Self>),
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `if (condition) then_branch else else_branch`.
    If {
        /// The condition, tested for truthiness.
        condition:   Expr,
        /// Executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Executed otherwise, if present.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `while (condition) body`. `for` loops are lowered to this.
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `print expr;`
    Print {
        /// The printed expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `return value;`
    Return {
        /// The returned expression, if any.
        value: Option<Expr>,
        /// Line of the `return` keyword.
        line:  usize,
    },
    /// `var name = initializer;`
    Var {
        /// The declared name.
        name:        String,
        /// The initial value. Without one the variable holds `null`.
        initializer: Option<Expr>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `fun name(params) { body }`
    Function(Rc<FunctionDecl>),
    /// A statement starting with a command word.
    Command(Command),
}

/// The command sub-grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Any command without a bespoke grammar.
    Default {
        /// The command word, lower-cased.
        name: String,
        /// Flags, parameters and arguments in source order.
        args: Vec<Arg>,
        /// Line of the command word.
        line: usize,
    },
    /// `help` or `help <command>`.
    Help {
        /// The command asked about, lower-cased.
        topic: Option<String>,
        /// Line of the `help` word.
        line:  usize,
    },
    /// `exit`.
    Exit {
        /// Line of the `exit` word.
        line: usize,
    },
}

/// One element of a default command's argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A positional argument.
    Argument(ArgValue),
    /// `-name`
    Flag(String),
    /// `--name a, b c`: a parameter with its own arguments. The list ends at
    /// the next `-`, a `;` or the end of input.
    Parameter {
        /// The parameter name.
        name:      String,
        /// The arguments collected for this parameter.
        arguments: Vec<ArgValue>,
    },
}

/// The value of an argument as written.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// A bare identifier, taken literally as a string.
    Word(String),
    /// A literal or parenthesised expression, evaluated before dispatch.
    Expr(Expr),
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

/// Represents a short-circuiting logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

impl std::fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}
