use crate::{
    ast::{NodeIds, Stmt},
    error::ParseError,
    interpreter::{parser::core::Parser, token::Token},
};

/// Parser state and the program-level loop.
///
/// Holds the token cursor, the collected errors and the node id allocator,
/// and drives `declaration` until the end of input.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence levels from assignment down to
/// multiplication, including the short-circuiting logical operators.
pub mod binary;

/// Unary, call and primary expressions.
///
/// Handles prefix operators, chained calls and the atoms of the grammar.
pub mod unary;

/// Statement parsing.
///
/// Declarations, control flow, `print`, `return` and expression statements.
/// `for` loops are lowered to `while` here.
pub mod statement;

/// Block parsing.
pub mod block;

/// The command sub-grammar.
///
/// Statements that start with a command word are parsed into flags,
/// parameters and positional arguments instead of an expression.
pub mod command;

/// Token cursor helpers shared by the other parser modules.
pub mod utils;

/// Parses a token stream into statements.
///
/// The whole stream is parsed even when errors are found: each malformed
/// statement is skipped up to the next statement boundary, so every syntax
/// error in the input is returned together.
///
/// # Parameters
/// - `tokens`: Tokens produced by the lexer, ending with `Eof`.
/// - `ids`: The allocator for resolvable node ids.
/// - `command_mode`: Whether `print` and command statements may omit the
///   final `;`.
///
/// # Returns
/// The statements in source order, or every error found.
///
/// # Example
/// ```
/// use clara::{
///     ast::{NodeIds, Stmt},
///     interpreter::{lexer::lex, parser::parse, token::CommandWords},
/// };
///
/// let lexed = lex("var a = 1; print a;", &CommandWords::default());
/// let statements = parse(&lexed.tokens, &mut NodeIds::new(), false).unwrap();
///
/// assert_eq!(statements.len(), 2);
/// assert!(matches!(statements[1], Stmt::Print { .. }));
/// ```
pub fn parse(tokens: &[Token],
             ids: &mut NodeIds,
             command_mode: bool)
             -> Result<Vec<Stmt>, Vec<ParseError>> {
    Parser::new(tokens, ids, command_mode).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Arg, ArgValue, Command, Expr},
        interpreter::{lexer::lex, token::CommandWords},
    };

    fn parse_with(source: &str, words: &CommandWords, command_mode: bool)
                  -> Result<Vec<Stmt>, Vec<ParseError>> {
        let lexed = lex(source, words);
        parse(&lexed.tokens, &mut NodeIds::new(), command_mode)
    }

    fn parse_script(source: &str) -> Result<Vec<Stmt>, Vec<ParseError>> {
        parse_with(source, &CommandWords::default(), false)
    }

    #[test]
    fn parameter_collects_until_next_marker() {
        let mut words = CommandWords::empty();
        words.insert("mycmd");
        let statements = parse_with("mycmd --foo x y -bar", &words, false).expect("parses");

        assert_eq!(statements,
                   vec![Stmt::Command(Command::Default {
                       name: "mycmd".to_string(),
                       args: vec![Arg::Parameter { name:      "foo".to_string(),
                                                   arguments: vec![ArgValue::Word("x".to_string()),
                                                                   ArgValue::Word("y".to_string())], },
                                  Arg::Flag("bar".to_string())],
                       line: 1,
                   })]);
    }

    #[test]
    fn lone_double_dash_is_an_error() {
        let errors = parse_script("open --;").expect_err("must fail");
        assert!(matches!(errors.as_slice(),
                         [ParseError::ParameterMustBeIdentifier { line: 1, .. }]));

        let errors = parse_script("open --").expect_err("must fail");
        assert!(matches!(errors.as_slice(), [ParseError::ParameterMustBeIdentifier { .. }]));
    }

    #[test]
    fn dash_before_a_number_is_not_a_flag() {
        let errors = parse_script("open -5;").expect_err("must fail");
        assert!(matches!(errors.as_slice(), [ParseError::FlagMustBeIdentifier { .. }]));
    }

    #[test]
    fn help_only_accepts_command_words() {
        assert!(parse_script("help start;").is_ok());
        let errors = parse_script("help banana;").expect_err("must fail");
        assert!(matches!(errors.as_slice(), [ParseError::NoSuchCommand { .. }]));
    }

    fn numbered(prefix: &str, count: usize) -> String {
        (0..count).map(|i| format!("{prefix}{i}")).collect::<Vec<_>>().join(", ")
    }

    #[test]
    fn calls_take_at_most_255_arguments() {
        let statements = parse_script(&format!("f({});", numbered("", 255))).expect("parses");
        let [Stmt::Expression { expr: Expr::Call { arguments, .. },
                                .. }] = statements.as_slice()
        else {
            panic!("expected a call statement, got {statements:?}");
        };
        assert_eq!(arguments.len(), 255);

        let source = format!("f({});\nprint (;", numbered("", 256));
        let errors = parse_script(&source).expect_err("must fail");
        assert!(matches!(errors.as_slice(),
                         [ParseError::TooManyArguments { line: 1 },
                          ParseError::ExpectedExpression { line: 2, .. }]),
                "{errors:?}");
    }

    #[test]
    fn functions_take_at_most_255_parameters() {
        let source = format!("fun f({}) {{}}", numbered("p", 255));
        let statements = parse_script(&source).expect("parses");
        let [Stmt::Function(declaration)] = statements.as_slice() else {
            panic!("expected a function, got {statements:?}");
        };
        assert_eq!(declaration.params.len(), 255);

        let source = format!("fun f({}) {{}}\nprint (;", numbered("p", 300));
        let errors = parse_script(&source).expect_err("must fail");
        assert!(matches!(errors.as_slice(),
                         [ParseError::TooManyParameters { line: 1 },
                          ParseError::ExpectedExpression { line: 2, .. }]),
                "{errors:?}");
    }

    #[test]
    fn errors_are_collected_after_synchronizing() {
        let errors = parse_script("var = 1;\nprint 2;\nvar b = ;\nprint 3;").expect_err("must fail");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line(), 1);
        assert_eq!(errors[1].line(), 3);
    }

    #[test]
    fn invalid_assignment_target_is_reported() {
        let errors = parse_script("1 = 2;").expect_err("must fail");
        assert_eq!(errors, vec![ParseError::InvalidAssignmentTarget { line: 1 }]);
    }

    #[test]
    fn command_mode_allows_missing_semicolon() {
        let words = CommandWords::default();
        assert!(parse_with("print 1", &words, true).is_ok());
        assert!(parse_with("print 1", &words, false).is_err());
        assert!(parse_with("start reaction", &words, false).is_ok());
    }

    #[test]
    fn ids_stay_unique_across_parses() {
        let words = CommandWords::default();
        let mut ids = NodeIds::new();
        let first = parse(&lex("a;", &words).tokens, &mut ids, false).expect("parses");
        let second = parse(&lex("a;", &words).tokens, &mut ids, false).expect("parses");

        let id_of = |statements: &[Stmt]| match &statements[0] {
            Stmt::Expression { expr: Expr::Variable { id, .. },
                               .. } => *id,
            other => panic!("unexpected statement {other:?}"),
        };
        assert_ne!(id_of(&first), id_of(&second));
    }
}
