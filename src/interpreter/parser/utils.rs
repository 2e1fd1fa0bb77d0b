use crate::{
    error::ParseError,
    interpreter::{
        parser::core::{END, ParseResult, Parser},
        token::{Token, TokenKind},
    },
};

impl Parser<'_> {
    /// The token under the cursor.
    pub(in crate::interpreter::parser) fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&END)
    }

    /// The most recently consumed token.
    pub(in crate::interpreter::parser) fn previous(&self) -> &Token {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&END)
    }

    pub(in crate::interpreter::parser) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Consumes the current token and returns it.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(in crate::interpreter::parser) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes the current token if it has the given kind.
    pub(in crate::interpreter::parser) fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes a token of the given kind or fails.
    ///
    /// # Parameters
    /// - `kind`: The required token kind.
    /// - `expected`: Description used in the error message.
    ///
    /// # Errors
    /// `Expected`, or `UnexpectedEndOfInput` when the stream is exhausted.
    pub(in crate::interpreter::parser) fn consume(&mut self,
                                                 kind: TokenKind,
                                                 expected: &'static str)
                                                 -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(self.expected(expected))
    }

    /// Builds the error for a missing construct at the cursor.
    pub(in crate::interpreter::parser) fn expected(&self, expected: &'static str) -> ParseError {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            ParseError::UnexpectedEndOfInput { expected,
                                               line: token.line }
        } else {
            ParseError::Expected { expected,
                                   found: token.lexeme.clone(),
                                   line: token.line }
        }
    }

    /// Ends a statement.
    ///
    /// A `;` is always accepted. When `optional` is set, the end of input
    /// ends the statement too.
    pub(in crate::interpreter::parser) fn end_statement(&mut self,
                                                       optional: bool)
                                                       -> ParseResult<()> {
        if self.matches(TokenKind::Semicolon) || (optional && self.is_at_end()) {
            return Ok(());
        }
        Err(self.expected("';'"))
    }

    /// Discards tokens until a likely statement boundary.
    ///
    /// Stops after a `;` or before a token that starts a statement.
    pub(in crate::interpreter::parser) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
                | TokenKind::Command => return,
                _ => {
                    self.advance();
                },
            }
        }
    }
}
