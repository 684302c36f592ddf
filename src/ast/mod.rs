//! Abstract Syntax Tree for Dotling.

pub mod expr;
pub mod stmt;

pub use expr::{BinaryOp, Expr, ExprKind};
pub use stmt::{FunctionDecl, ImportDecl, Program, Stmt, StmtKind};
