use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDecl, Stmt},
    error::ParseError,
    interpreter::{
        parser::{
            core::{ParseResult, Parser},
            unary::MAX_ARGUMENTS,
        },
        token::{Literal, TokenKind},
    },
};

impl Parser<'_> {
    /// Parses a declaration, recovering from errors.
    ///
    /// On a syntax error the error is recorded, the parser synchronizes on
    /// the next statement boundary and `None` is returned, so one malformed
    /// statement does not hide the ones after it.
    ///
    /// Grammar: `declaration := fun_decl | var_decl | statement`
    pub(in crate::interpreter::parser) fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.matches(TokenKind::Fun) {
            self.function()
        } else if self.matches(TokenKind::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(error) => {
                self.errors.push(error);
                self.synchronize();
                None
            },
        }
    }

    /// Parses a function declaration whose keyword was consumed.
    ///
    /// Grammar: `fun_decl := "fun" IDENTIFIER "(" parameters? ")" block`
    fn function(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "function name")?;
        self.consume(TokenKind::LeftParen, "'(' after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() == MAX_ARGUMENTS {
                    self.errors
                        .push(ParseError::TooManyParameters { line: self.peek().line });
                }
                params.push(self.consume(TokenKind::Identifier, "parameter name")?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "')' after parameters")?;
        self.consume(TokenKind::LeftBrace, "'{' before function body")?;
        let body = self.block()?;

        Ok(Stmt::Function(Rc::new(FunctionDecl { name: name.lexeme,
                                                 params,
                                                 body,
                                                 line: name.line })))
    }

    /// Grammar: `var_decl := "var" IDENTIFIER ("=" expression)? ";"`
    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "variable name")?;
        let initializer = if self.matches(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };
        self.end_statement(false)?;

        Ok(Stmt::Var { name: name.lexeme,
                       initializer,
                       line: name.line })
    }

    /// Parses a statement that is not a declaration.
    ///
    /// Grammar: `statement := for | if | print | return | while | block |
    /// command | expression_stmt`
    fn statement(&mut self) -> ParseResult<Stmt> {
        self.nested(Self::statement_kind)
    }

    fn statement_kind(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::For => {
                self.advance();
                self.for_statement()
            },
            TokenKind::If => {
                self.advance();
                self.if_statement()
            },
            TokenKind::Print => {
                self.advance();
                self.print_statement()
            },
            TokenKind::Return => {
                self.advance();
                self.return_statement()
            },
            TokenKind::While => {
                self.advance();
                self.while_statement()
            },
            TokenKind::LeftBrace => {
                self.advance();
                Ok(Stmt::Block(self.block()?))
            },
            TokenKind::Command => {
                self.advance();
                self.command()
            },
            _ => self.expression_statement(),
        }
    }

    /// Parses a `for` loop and lowers it to a `while` loop.
    ///
    /// `for (init; cond; incr) body` becomes
    /// `{ init; while (cond) { body; incr; } }`. A missing condition is
    /// `true`.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        self.consume(TokenKind::LeftParen, "'(' after 'for'")?;

        let initializer = if self.matches(TokenKind::Semicolon) {
            None
        } else if self.matches(TokenKind::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.check(TokenKind::Semicolon) {
            Expr::Literal { value: Literal::Bool(true),
                            line }
        } else {
            self.expression()?
        };
        self.consume(TokenKind::Semicolon, "';' after loop condition")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::RightParen, "')' after for clauses")?;

        let mut body = self.statement()?;
        if let Some(increment) = increment {
            let increment_line = increment.line_number();
            body = Stmt::Block(vec![body,
                                    Stmt::Expression { expr: increment,
                                                       line: increment_line, }]);
        }

        let mut lowered = Stmt::While { condition,
                                        body: Box::new(body),
                                        line };
        if let Some(initializer) = initializer {
            lowered = Stmt::Block(vec![initializer, lowered]);
        }
        Ok(lowered)
    }

    /// Grammar: `if := "if" "(" expression ")" statement ("else" statement)?`
    ///
    /// An `else` binds to the nearest `if`.
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        self.consume(TokenKind::LeftParen, "'(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "')' after if condition")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.matches(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If { condition,
                      then_branch,
                      else_branch,
                      line })
    }

    /// Grammar: `print := "print" expression ";"`
    ///
    /// The `;` may be left out at the end of input in command mode.
    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        let expr = self.expression()?;
        self.end_statement(self.command_mode)?;

        Ok(Stmt::Print { expr, line })
    }

    /// Grammar: `return := "return" expression? ";"`
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.end_statement(false)?;

        Ok(Stmt::Return { value, line })
    }

    /// Grammar: `while := "while" "(" expression ")" statement`
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        self.consume(TokenKind::LeftParen, "'(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "')' after condition")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition,
                         body,
                         line })
    }

    /// Grammar: `expression_stmt := expression ";"`
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.peek().line;
        let expr = self.expression()?;
        self.end_statement(false)?;

        Ok(Stmt::Expression { expr, line })
    }
}
