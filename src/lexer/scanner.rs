// src/lexer/scanner.rs
// Maximal-munch scanner over the determinized token tables.

use std::{fmt, iter::FusedIterator};

use super::{
    decimal::{DECIMAL_SCALE, round_half_up},
    error::LexError,
    tables::{
        Accept, Dfa, TokenSet, build_tables,
        tokens::{ALPHANUM, DECIMAL_LITERAL, IDENTIFIER, INT_LITERAL},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: String,
    pub lexeme: String,
    /// Line the token starts on, 1-based.
    pub line: usize,
}

impl Token {
    pub fn new(kind: &str, lexeme: &str, line: usize) -> Self {
        Self {
            kind: kind.to_string(),
            lexeme: lexeme.to_string(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}> at line {}", self.kind, self.lexeme, self.line)
    }
}

/// Everything one pass produced. Errors are in the order they were hit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn halted(&self) -> bool {
        self.errors.iter().any(LexError::is_fatal)
    }
}

/// Same set `Character.isWhitespace` uses for ASCII.
#[inline]
fn is_white(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r' | 0x1C..=0x1F)
}

pub struct Lexer {
    dfa: Dfa,
}

impl Lexer {
    pub fn new(dfa: Dfa) -> Self {
        Self { dfa }
    }

    pub fn from_tokens(tokens: TokenSet) -> Self {
        Self::new(build_tables(tokens))
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Lazy pass over `src`. Each call starts over from the beginning.
    pub fn scan<'a>(&'a self, src: &'a str) -> Scanner<'a> {
        Scanner {
            dfa: &self.dfa,
            src,
            pos: 0,
            line: 1,
            pending: None,
            halted: false,
        }
    }

    pub fn tokenize(&self, src: &str) -> LexOutput {
        let mut out = LexOutput::default();
        for item in self.scan(src) {
            match item {
                Ok(tok) => out.tokens.push(tok),
                Err(e) => out.errors.push(e),
            }
        }
        out
    }
}

/// Yields tokens and recoverable diagnostics in input order. After an
/// unterminated block comment nothing more is produced.
#[derive(Clone)]
pub struct Scanner<'a> {
    dfa: &'a Dfa,
    src: &'a str,
    pos: usize,
    line: usize,
    // Token owed after an InvalidDecimalLiteral diagnostic.
    pending: Option<Token>,
    halted: bool,
}

impl<'a> Scanner<'a> {
    pub fn line(&self) -> usize {
        self.line
    }

    /// End offset and accept info of the longest final-state prefix at `start`.
    fn longest_match(&self, start: usize) -> Option<(usize, &'a Accept)> {
        let dfa: &'a Dfa = self.dfa;
        let mut state = dfa.start();
        let mut best = None;
        for (i, &b) in self.src.as_bytes()[start..].iter().enumerate() {
            let Some(next) = dfa.step(state, b) else {
                break;
            };
            state = next;
            if let Some(accept) = &dfa.state(state).accept {
                best = Some((start + i + 1, accept));
            }
        }
        best
    }

    /// Per-tag post-processing of a matched lexeme.
    fn finish(&mut self, kind: &str, lexeme: &str, line: usize) -> Result<Token, LexError> {
        match kind {
            DECIMAL_LITERAL => match round_half_up(lexeme, DECIMAL_SCALE) {
                Some(canon) => Ok(Token::new(kind, &canon, line)),
                None => {
                    self.pending = Some(Token::new(kind, lexeme, line));
                    Err(LexError::InvalidDecimalLiteral {
                        line,
                        lexeme: lexeme.to_string(),
                    })
                }
            },
            ALPHANUM => {
                let bytes = lexeme.as_bytes();
                if bytes.iter().all(u8::is_ascii_lowercase) {
                    Ok(Token::new(IDENTIFIER, lexeme, line))
                } else if bytes.iter().all(u8::is_ascii_digit) {
                    Ok(Token::new(INT_LITERAL, lexeme, line))
                } else {
                    // Matched by the automaton but rejected here; no token.
                    Err(LexError::InvalidIdentifier {
                        line,
                        lexeme: lexeme.to_string(),
                    })
                }
            }
            _ => Ok(Token::new(kind, lexeme, line)),
        }
    }

    fn advance(&mut self) -> Option<Result<Token, LexError>> {
        let src: &'a str = self.src;
        let bytes = src.as_bytes();
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if is_white(b) {
                if b == b'\n' {
                    self.line += 1;
                }
                self.pos += 1;
                continue;
            }

            let rest = &src[self.pos..];
            if rest.starts_with("/*") {
                let Some(close) = rest[2..].find("*/") else {
                    self.halted = true;
                    return Some(Err(LexError::UnterminatedComment { line: self.line }));
                };
                let end = self.pos + 2 + close + 2;
                self.line += bytes[self.pos..end].iter().filter(|&&c| c == b'\n').count();
                self.pos = end;
                continue;
            }
            if rest.starts_with("//") {
                let pos = self.pos;
                self.pos = rest.find('\n').map_or(bytes.len(), |i| pos + i);
                continue;
            }

            let start = self.pos;
            let line = self.line;
            let Some((end, accept)) = self.longest_match(start) else {
                let symbol = rest.chars().next()?;
                self.pos += symbol.len_utf8();
                return Some(Err(LexError::UnrecognizedSymbol { line, symbol }));
            };
            self.pos = end;
            let lexeme = &src[start..end];
            return Some(self.finish(&accept.token, lexeme, line));
        }
        None
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tok) = self.pending.take() {
            return Some(Ok(tok));
        }
        if self.halted {
            return None;
        }
        let item = self.advance();
        match &item {
            Some(Ok(tok)) => log::trace!("{tok}"),
            Some(Err(e)) => {
                log::debug!("{e}");
                if e.is_fatal() {
                    self.halted = true;
                }
            }
            None => self.halted = true,
        }
        item
    }
}

impl FusedIterator for Scanner<'_> {}
