//! Parser module for Dotling.

mod core;
mod expressions;
mod statements;


pub use self::core::Parser;
