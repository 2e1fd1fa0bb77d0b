//! # clara
//!
//! clara is an embeddable, line-oriented scripting language written in Rust.
//! The same token stream expresses either ordinary statements (variables,
//! functions with closures, control flow) or shell-like commands: a command
//! word followed by positional arguments, `-flags` and `--parameters`.
//! Evaluated commands are handed to registered modules as a flat map.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr`, `Stmt` and `Command` enums that
/// represent source code as a tree. The tree is built by the parser, checked
/// by the resolver and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression, statement and command types for every construct.
/// - Attaches line numbers to nodes for error reporting.
/// - Gives resolvable nodes stable ids for the resolution side table.
pub mod ast;
/// The boundary between the interpreter and external modules.
///
/// Evaluated commands are flattened into a `CommandMap` and handed to the
/// registered modules that accept the command word. Modules only perform
/// side effects or refuse; the interpreter never depends on what they do.
///
/// # Responsibilities
/// - Defines the `Module` trait and the session-owned `ModuleRegistry`.
/// - Carries out `help`, `exit` and default commands.
pub mod command;
/// Provides unified error types for every stage.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// resolving or evaluating code, each with the line it was found on, and the
/// sink that collects them.
///
/// # Responsibilities
/// - Defines one error enum per stage plus the umbrella `Error`.
/// - Records whether any error occurred so evaluation can be suppressed.
pub mod error;
/// Orchestrates the stages of execution.
///
/// This module ties together lexing, parsing, resolution, evaluation and
/// value representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, resolver and
///   evaluator.
/// - Manages the flow of data between stages.
pub mod interpreter;
/// The driver owning all state that lives across inputs.
pub mod session;

pub use error::Error;
pub use interpreter::evaluator::core::Status;
pub use session::{Session, run};
