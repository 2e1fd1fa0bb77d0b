/// Interpreter state and the top-level `interpret` loop.
///
/// Defines the control-flow signals (`Flow`, `Halt`) and the final `Status`
/// of an `interpret` call.
pub mod core;

/// Statement execution, including block scoping.
pub mod statement;

/// Expression evaluation: literals, variables, assignment and the
/// short-circuiting logical operators.
pub mod expression;

/// Unary operator evaluation.
pub mod unary;

/// Binary operator evaluation.
///
/// Arithmetic and comparison require numbers; `+` also concatenates two
/// strings; equality works on any pair of values.
pub mod binary;

/// Function call evaluation.
pub mod function;

/// Command statements.
///
/// Evaluates the arguments of a command, flattens them into a
/// `CommandMap` and hands it to the command distributor.
pub mod command;
