//! Expression parsing.

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.term()
    }

    /// Addition / concatenation: a + b
    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.postfix()?;

        while self.eat(&TokenKind::Plus) {
            let span = self.prev_span();
            let right = self.postfix()?;
            expr = Expr::new(
                ExprKind::Binary {
                    left: Box::new(expr),
                    operator: BinaryOp::Add,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(expr)
    }

    /// Attribute access and calls: a.b.c(args).d
    fn postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.eat(&TokenKind::Dot) {
                let span = self.prev_span();
                let name = self.expect_identifier()?;
                expr = Expr::new(
                    ExprKind::Get {
                        object: Box::new(expr),
                        name,
                    },
                    span,
                );
            } else if self.check(&TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let span = self.span();
        self.expect(&TokenKind::LeftParen)?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        ))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let span = self.span();
        let token = self.bump();

        let kind = match token.kind {
            TokenKind::IntLiteral(n) => ExprKind::IntLiteral(n),
            TokenKind::StringLiteral(s) => ExprKind::StringLiteral(s),
            TokenKind::BoolLiteral(b) => ExprKind::BoolLiteral(b),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Identifier(name) => ExprKind::Variable(name),
            TokenKind::LeftParen => {
                let expr = self.expression()?;
                self.expect(&TokenKind::RightParen)?;
                return Ok(expr);
            }
            TokenKind::Eof => return Err(ParserError::unexpected_eof(span)),
            other => {
                return Err(ParserError::unexpected_token(
                    "expression",
                    format!("{}", other),
                    span,
                ))
            }
        };

        Ok(Expr::new(kind, span))
    }
}
