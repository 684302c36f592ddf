//! Parser state and the token cursor.

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenKind};
use crate::span::Span;

pub type ParseResult<T> = Result<T, ParserError>;

/// Recursive-descent parser over a scanned token stream. The stream always
/// ends with an EOF token and the cursor never moves past it.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse the whole token stream into a program.
    pub fn parse(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        while !self.at_end() {
            statements.push(self.declaration()?);
        }
        Ok(Program::new(statements))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Consume and return the current token. At end of input this returns
    /// the EOF token itself, so a caller matching on it reports end-of-file
    /// instead of re-reading the last real token forever.
    pub(crate) fn bump(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if !self.at_end() {
            self.current += 1;
        }
        token
    }

    /// Does the current token have this kind? Payload-carrying kinds match
    /// on the variant alone.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Consume the current token if it has this kind.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.bump());
        }
        Err(ParserError::unexpected_token(
            kind.to_string(),
            self.peek().kind.to_string(),
            self.span(),
        ))
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<String> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(ParserError::unexpected_token(
                "identifier",
                self.peek().kind.to_string(),
                self.span(),
            )),
        }
    }

    /// Span of the current, not yet consumed, token.
    pub(crate) fn span(&self) -> Span {
        self.peek().span
    }

    /// Span of the most recently consumed token.
    pub(crate) fn prev_span(&self) -> Span {
        self.tokens[self.current.saturating_sub(1)].span
    }
}
