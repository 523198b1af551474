// src/lexer/error.rs
use thiserror::Error;

/// Lexical diagnostics. Only [`LexError::UnterminatedComment`] stops scanning.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("Lexical error at line {line}: Unterminated multi-line comment.")]
    UnterminatedComment { line: usize },

    #[error("Lexical error at line {line}: Unrecognized symbol: {symbol}")]
    UnrecognizedSymbol { line: usize, symbol: char },

    #[error("Lexical error at line {line}: Invalid decimal literal: {lexeme}")]
    InvalidDecimalLiteral { line: usize, lexeme: String },

    #[error("Lexical error at line {line}: Invalid identifier: {lexeme}")]
    InvalidIdentifier { line: usize, lexeme: String },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedComment { line }
            | Self::UnrecognizedSymbol { line, .. }
            | Self::InvalidDecimalLiteral { line, .. }
            | Self::InvalidIdentifier { line, .. } => *line,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnterminatedComment { .. })
    }
}
