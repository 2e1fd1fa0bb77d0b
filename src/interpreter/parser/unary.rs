use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::{Literal, TokenKind},
    },
};

/// Most arguments a call may pass, and most parameters a function may take.
pub(in crate::interpreter::parser) const MAX_ARGUMENTS: usize = 255;

impl Parser<'_> {
    /// Parses a prefix operation.
    ///
    /// Grammar: `unary := ("!" | "-") unary | call`
    pub(in crate::interpreter::parser) fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Bang => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Negate,
            _ => return self.call(),
        };
        let line = self.advance().line;
        let operand = self.nested(Self::unary)?;

        Ok(Expr::Unary { op,
                         operand: Box::new(operand),
                         line })
    }

    /// Parses a primary expression followed by any number of calls.
    ///
    /// Grammar: `call := primary ("(" arguments? ")")*`
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        while self.matches(TokenKind::LeftParen) {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    /// Parses the argument list of a call whose `(` was consumed.
    ///
    /// More than [`MAX_ARGUMENTS`] arguments is reported once, but the call
    /// is still built.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() == MAX_ARGUMENTS {
                    self.errors
                        .push(ParseError::TooManyArguments { line: self.peek().line });
                }
                arguments.push(self.expression()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        let paren = self.consume(TokenKind::RightParen, "')' after arguments")?;

        Ok(Expr::Call { callee: Box::new(callee),
                        arguments,
                        line: paren.line })
    }

    /// Parses the atoms of the grammar.
    ///
    /// Grammar: `primary := literal | IDENTIFIER | COMMAND | "(" expression ")"`
    ///
    /// A command word in operand position evaluates to its own name.
    pub(in crate::interpreter::parser) fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(Expr::Literal { value: token.literal.unwrap_or(Literal::Null),
                                   line:  token.line, })
            },
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Literal { value: Literal::Null,
                                   line:  token.line, })
            },
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Variable { id:   self.ids.fresh(),
                                    name: token.lexeme,
                                    line: token.line, })
            },
            TokenKind::Command => {
                self.advance();
                Ok(Expr::CommandRef { name: token.lexeme,
                                      line: token.line, })
            },
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(TokenKind::RightParen, "')' after expression")?;
                Ok(Expr::Grouping { expr: Box::new(expr),
                                    line: token.line, })
            },
            TokenKind::Eof => Err(ParseError::UnexpectedEndOfInput { expected: "expression",
                                                                     line:     token.line, }),
            _ => Err(ParseError::ExpectedExpression { found: token.lexeme,
                                                      line:  token.line, }),
        }
    }
}
