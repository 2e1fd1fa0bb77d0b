use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::ParseError,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::TokenKind,
    },
};

impl Parser<'_> {
    /// Parses an assignment.
    ///
    /// Right-associative. The target is checked after the right side is
    /// parsed: anything but a variable is reported as an invalid target and
    /// the left side is returned unchanged, so parsing carries on.
    ///
    /// Grammar: `assignment := IDENTIFIER "=" assignment | logic_or`
    pub(in crate::interpreter::parser) fn assignment(&mut self) -> ParseResult<Expr> {
        let target = self.logical_or()?;

        if self.matches(TokenKind::Equal) {
            let line = self.previous().line;
            let value = self.assignment()?;

            if let Expr::Variable { id, name, line } = target {
                return Ok(Expr::Assign { id,
                                         name,
                                         value: Box::new(value),
                                         line });
            }
            self.errors.push(ParseError::InvalidAssignmentTarget { line });
        }

        Ok(target)
    }

    /// Grammar: `logic_or := logic_and ("or" logic_and)*`
    fn logical_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.logical_and()?;
        while self.matches(TokenKind::Or) {
            let line = self.previous().line;
            let right = self.logical_and()?;
            left = Expr::Logical { left: Box::new(left),
                                   op: LogicalOperator::Or,
                                   right: Box::new(right),
                                   line };
        }
        Ok(left)
    }

    /// Grammar: `logic_and := equality ("and" equality)*`
    fn logical_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.equality()?;
        while self.matches(TokenKind::And) {
            let line = self.previous().line;
            let right = self.equality()?;
            left = Expr::Logical { left: Box::new(left),
                                   op: LogicalOperator::And,
                                   right: Box::new(right),
                                   line };
        }
        Ok(left)
    }

    /// Grammar: `equality := comparison (("!=" | "==") comparison)*`
    fn equality(&mut self) -> ParseResult<Expr> {
        self.binary_level(Self::comparison,
                          &[BinaryOperator::Equal, BinaryOperator::NotEqual])
    }

    /// Grammar: `comparison := term ((">" | ">=" | "<" | "<=") term)*`
    fn comparison(&mut self) -> ParseResult<Expr> {
        self.binary_level(Self::term,
                          &[BinaryOperator::Greater,
                            BinaryOperator::GreaterEqual,
                            BinaryOperator::Less,
                            BinaryOperator::LessEqual])
    }

    /// Grammar: `term := factor (("-" | "+") factor)*`
    fn term(&mut self) -> ParseResult<Expr> {
        self.binary_level(Self::factor, &[BinaryOperator::Sub, BinaryOperator::Add])
    }

    /// Grammar: `factor := unary (("/" | "*") unary)*`
    fn factor(&mut self) -> ParseResult<Expr> {
        self.binary_level(Self::unary, &[BinaryOperator::Div, BinaryOperator::Mul])
    }

    /// Parses one left-associative precedence level.
    ///
    /// # Parameters
    /// - `operand`: Parser for the next-higher precedence level.
    /// - `operators`: The operators accepted at this level.
    ///
    /// # Returns
    /// A left-leaning tree of `Expr::Binary` nodes.
    fn binary_level(&mut self,
                    operand: fn(&mut Self) -> ParseResult<Expr>,
                    operators: &[BinaryOperator])
                    -> ParseResult<Expr> {
        let mut left = operand(self)?;
        loop {
            if let Some(op) = token_to_binary_operator(self.peek().kind)
               && operators.contains(&op)
            {
                let line = self.advance().line;
                let right = operand(self)?;
                left = Expr::Binary { left: Box::new(left),
                                      op,
                                      right: Box::new(right),
                                      line };
                continue;
            }
            break;
        }
        Ok(left)
    }
}

/// Maps a token kind to its binary operator, if it is one.
const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}
