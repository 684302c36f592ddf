//! Lexer module for Dotling.

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};
