//! Statement AST nodes.

use crate::ast::expr::Expr;
use crate::span::Span;

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Expression statement: expr;
    Expression(Expr),

    /// Variable declaration: let x = expr;
    Let {
        name: String,
        initializer: Option<Expr>,
    },

    /// Return statement: return expr;
    Return(Option<Expr>),

    /// Function declaration
    Function(FunctionDecl),

    /// Import declaration: import a.b.c;
    Import(ImportDecl),
}

/// Import declaration. The path is kept as raw segments; the loader turns it
/// into a validated `ModuleName`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub segments: Vec<String>,
    pub span: Span,
}

impl ImportDecl {
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

/// Function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A complete program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}
