/// The evaluator module executes statements and computes values.
///
/// The evaluator walks the resolved tree, performs arithmetic and logical
/// operations, manages the environment chain and hands evaluated commands
/// to the command distributor.
///
/// # Responsibilities
/// - Evaluates every expression and statement variant.
/// - Swaps and restores the current scope around blocks and calls.
/// - Reports runtime errors such as type mismatches or arity mismatches.
pub mod evaluator;
/// The environment module implements the runtime scope chain.
///
/// Scopes map names to values and point to the scope enclosing them.
/// Function values keep their defining scope alive, which is what gives the
/// language closures.
pub mod environment;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens,
/// each corresponding to a language element such as a number, a string, an
/// identifier, a keyword, a command word or an operator. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Tags command words so the parser can switch grammars.
/// - Reports lexical errors without stopping the scan.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions by recursive descent.
/// - Parses the command sub-grammar of flags, parameters and arguments.
/// - Recovers from syntax errors so that every error is reported.
pub mod parser;
/// The resolver binds variable references to their declarations.
///
/// A single static pass computes how many scopes separate each reference
/// from its declaration, so the evaluator can jump straight to the right
/// scope instead of searching by name.
///
/// # Responsibilities
/// - Produces the distance side table keyed by expression id.
/// - Rejects duplicate declarations, reads in an own initializer and
///   `return` outside functions.
pub mod resolver;
/// Stack growth for the recursive passes.
pub mod stack;
/// The token vocabulary shared by the lexer and the parser.
pub mod token;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum with its equality, truthiness and display
///   rules.
/// - Defines callables: user functions with closures and built-ins.
pub mod value;
