// src/lexer/mod.rs
pub mod decimal;
pub mod error;
pub mod grammar;
pub mod scanner;
pub mod tables;

pub use error::LexError;
pub use scanner::{LexOutput, Lexer, Scanner, Token};

/// Lexer for FOS source built from [`grammar::fos_token_set`].
pub fn fos_lexer() -> Lexer {
    Lexer::from_tokens(grammar::fos_token_set())
}
