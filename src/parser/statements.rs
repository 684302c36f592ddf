//! Statement and declaration parsing.

use crate::ast::*;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    /// Parse a declaration or a statement.
    pub(crate) fn declaration(&mut self) -> ParseResult<Stmt> {
        if self.check(&TokenKind::Fn) {
            self.function_declaration()
        } else {
            self.statement()
        }
    }

    fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let start = self.span();
        self.expect(&TokenKind::Fn)?;
        let name = self.expect_identifier()?;

        self.expect(&TokenKind::LeftParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                params.push(self.expect_identifier()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        self.expect(&TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.at_end() {
            body.push(self.declaration()?);
        }
        self.expect(&TokenKind::RightBrace)?;

        let span = start;
        Ok(Stmt::new(
            StmtKind::Function(FunctionDecl {
                name,
                params,
                body,
                span,
            }),
            span,
        ))
    }

    pub(crate) fn statement(&mut self) -> ParseResult<Stmt> {
        if self.check(&TokenKind::Let) {
            self.let_statement()
        } else if self.check(&TokenKind::Return) {
            self.return_statement()
        } else if self.check(&TokenKind::Import) {
            self.import_statement()
        } else {
            self.expression_statement()
        }
    }

    fn let_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.span();
        self.expect(&TokenKind::Let)?;
        let name = self.expect_identifier()?;

        let initializer = if self.eat(&TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.expect(&TokenKind::Semicolon)?;
        Ok(Stmt::new(StmtKind::Let { name, initializer }, start))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.span();
        self.expect(&TokenKind::Return)?;

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };

        self.expect(&TokenKind::Semicolon)?;
        Ok(Stmt::new(StmtKind::Return(value), start))
    }

    /// Parse `import a.b.c;`. The dotted path is one or more identifiers
    /// separated by dots; validation of the segments as a module name happens
    /// at load time.
    fn import_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.span();
        self.expect(&TokenKind::Import)?;

        let mut segments = vec![self.expect_identifier()?];
        while self.eat(&TokenKind::Dot) {
            segments.push(self.expect_identifier()?);
        }

        self.expect(&TokenKind::Semicolon)?;
        Ok(Stmt::new(
            StmtKind::Import(ImportDecl {
                segments,
                span: start,
            }),
            start,
        ))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.span();
        let expr = self.expression()?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(Stmt::new(StmtKind::Expression(expr), start))
    }
}
