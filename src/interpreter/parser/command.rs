use crate::{
    ast::{Arg, ArgValue, Command, Expr, Stmt},
    error::ParseError,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::{Literal, TokenKind},
    },
};

impl Parser<'_> {
    /// Parses a command statement whose command word was consumed.
    ///
    /// `help` and `exit` have their own grammars; every other command word
    /// uses the default flag/parameter/argument grammar. A command ends at a
    /// `;` or at the end of input.
    pub(in crate::interpreter::parser) fn command(&mut self) -> ParseResult<Stmt> {
        let word = self.previous().clone();
        let name = word.lexeme.to_ascii_lowercase();
        let line = word.line;

        let command = match name.as_str() {
            "help" => self.help_command(line)?,
            "exit" => {
                self.end_command()?;
                Command::Exit { line }
            },
            _ => self.default_command(name, line)?,
        };

        Ok(Stmt::Command(command))
    }

    /// Grammar: `help := "help" COMMAND? terminator`
    fn help_command(&mut self, line: usize) -> ParseResult<Command> {
        let topic = if self.at_command_end() {
            None
        } else if self.matches(TokenKind::Command) {
            Some(self.previous().lexeme.to_ascii_lowercase())
        } else {
            let found = self.peek();
            return Err(ParseError::NoSuchCommand { found: found.lexeme.clone(),
                                                   line:  found.line, });
        };
        self.end_command()?;

        Ok(Command::Help { topic, line })
    }

    /// Parses the default command grammar.
    ///
    /// Grammar:
    /// ```text
    ///     command   := COMMAND (flag | parameter | argument | ",")* terminator
    ///     flag      := "-" IDENTIFIER
    ///     parameter := "-" "-" IDENTIFIER (argument | ",")*
    /// ```
    /// A parameter collects arguments until the next `-`, a `;` or the end
    /// of input.
    ///
    /// # Errors
    /// - `FlagMustBeIdentifier` / `ParameterMustBeIdentifier` when a marker
    ///   is not followed by a name, including a lone `--`.
    /// - `InvalidCommandArgument` for tokens that cannot be arguments.
    fn default_command(&mut self, name: String, line: usize) -> ParseResult<Command> {
        let mut args = Vec::new();

        while !self.at_command_end() {
            if self.matches(TokenKind::Comma) {
                continue;
            }
            if !self.matches(TokenKind::Minus) {
                args.push(Arg::Argument(self.command_argument()?));
                continue;
            }

            if self.matches(TokenKind::Minus) {
                let parameter = self.marker_name(true)?;
                let arguments = self.parameter_arguments()?;
                args.push(Arg::Parameter { name: parameter,
                                           arguments });
            } else {
                args.push(Arg::Flag(self.marker_name(false)?));
            }
        }
        self.end_command()?;

        tracing::trace!(command = %name, args = args.len(), "parsed command");
        Ok(Command::Default { name, args, line })
    }

    /// Reads the name after a `-` or `--` marker.
    fn marker_name(&mut self, parameter: bool) -> ParseResult<String> {
        if self.matches(TokenKind::Identifier) {
            return Ok(self.previous().lexeme.clone());
        }

        let token = self.peek();
        let found = token.lexeme.clone();
        let line = token.line;
        Err(if parameter {
                ParseError::ParameterMustBeIdentifier { found, line }
            } else {
                ParseError::FlagMustBeIdentifier { found, line }
            })
    }

    /// Collects the arguments of a parameter, skipping commas.
    fn parameter_arguments(&mut self) -> ParseResult<Vec<ArgValue>> {
        let mut arguments = Vec::new();
        while !self.at_command_end() && !self.check(TokenKind::Minus) {
            if self.matches(TokenKind::Comma) {
                continue;
            }
            arguments.push(self.command_argument()?);
        }
        Ok(arguments)
    }

    /// Parses one argument.
    ///
    /// Bare words, including command words, are taken literally. Literals
    /// and parenthesised expressions are evaluated before dispatch.
    fn command_argument(&mut self) -> ParseResult<ArgValue> {
        match self.peek().kind {
            TokenKind::Identifier | TokenKind::Command => {
                Ok(ArgValue::Word(self.advance().lexeme.clone()))
            },
            TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False => {
                let token = self.advance();
                Ok(ArgValue::Expr(Expr::Literal { value: token.literal.clone().unwrap_or(Literal::Null),
                                                  line:  token.line, }))
            },
            TokenKind::Null | TokenKind::LeftParen => Ok(ArgValue::Expr(self.primary()?)),
            _ => {
                let token = self.peek();
                Err(ParseError::InvalidCommandArgument { found: token.lexeme.clone(),
                                                         line:  token.line, })
            },
        }
    }

    fn at_command_end(&self) -> bool {
        self.check(TokenKind::Semicolon) || self.is_at_end()
    }

    /// Consumes the `;` ending a command, if there is one.
    fn end_command(&mut self) -> ParseResult<()> {
        self.end_statement(true)
    }
}
