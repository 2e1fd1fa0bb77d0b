use crate::{
    ast::Stmt,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::TokenKind,
    },
};

impl Parser<'_> {
    /// Parses the statements of a block whose `{` was consumed.
    ///
    /// Each inner declaration recovers from its own errors, so a bad line
    /// inside a block does not discard its siblings.
    ///
    /// Grammar: `block := "{" declaration* "}"`
    pub(in crate::interpreter::parser) fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.nested(Self::block_body)
    }

    fn block_body(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        self.consume(TokenKind::RightBrace, "'}' after block")?;

        Ok(statements)
    }
}
