use crate::{
    ast::{Expr, NodeIds, Stmt},
    error::ParseError,
    interpreter::{stack::ensure_sufficient_stack, token::Token},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting of expressions, statements and blocks the parser accepts.
pub(in crate::interpreter::parser) const MAX_NESTING: usize = 1024;

/// Sentinel returned when the cursor runs past a stream with no `Eof`.
pub(in crate::interpreter::parser) static END: Token = Token::eof(0);

/// A recursive-descent parser over a borrowed token slice.
///
/// The methods are split over the modules of [`crate::interpreter::parser`],
/// one per grammar family.
pub struct Parser<'a> {
    pub(in crate::interpreter::parser) tokens:       &'a [Token],
    pub(in crate::interpreter::parser) current:      usize,
    pub(in crate::interpreter::parser) ids:          &'a mut NodeIds,
    pub(in crate::interpreter::parser) command_mode: bool,
    pub(in crate::interpreter::parser) errors:       Vec<ParseError>,
    pub(in crate::interpreter::parser) depth:        usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    pub fn new(tokens: &'a [Token], ids: &'a mut NodeIds, command_mode: bool) -> Self {
        Self { tokens,
               current: 0,
               ids,
               command_mode,
               errors: Vec::new(),
               depth: 0 }
    }

    /// Parses the whole stream.
    ///
    /// Grammar: `program := declaration* EOF`
    ///
    /// # Returns
    /// The statements in order, or every error recorded along the way.
    /// Statements that did parse are discarded when any error was found.
    pub fn parse(mut self) -> Result<Vec<Stmt>, Vec<ParseError>> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        if self.errors.is_empty() {
            Ok(statements)
        } else {
            tracing::debug!(errors = self.errors.len(), "parse failed");
            Err(self.errors)
        }
    }

    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, assignment, and recursively descends through
    /// the precedence hierarchy.
    ///
    /// Grammar: `expression := assignment`
    pub(in crate::interpreter::parser) fn expression(&mut self) -> ParseResult<Expr> {
        self.nested(Self::assignment)
    }

    /// Runs one recursive grammar rule one level deeper.
    ///
    /// Past [`MAX_NESTING`] levels the rule is not entered and
    /// [`ParseError::TooDeeplyNested`] is returned instead.
    pub(in crate::interpreter::parser) fn nested<T>(&mut self,
                                                    rule: impl FnOnce(&mut Self) -> ParseResult<T>)
                                                    -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeeplyNested { line: self.peek().line });
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| rule(&mut *self));
        self.depth -= 1;
        result
    }
}
