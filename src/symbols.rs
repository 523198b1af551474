// src/symbols.rs
// Scope-stacked symbol table fed with identifier tokens.

use std::fmt;

use hashbrown::HashMap;
use thiserror::Error;

use crate::lexer::{Token, tables::tokens::IDENTIFIER};

/// Type recorded for identifiers registered straight from the token stream.
pub const UNDEFINED_TYPE: &str = "undefined";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Symbol {0} already declared.")]
    AlreadyDeclared(String),
    #[error("Cannot exit global scope")]
    GlobalScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: String,
    pub memory_location: u32,
    pub is_constant: bool,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Type: {}, Memory Location: {}, Constant: {}",
            self.name, self.ty, self.memory_location, self.is_constant
        )
    }
}

/// Innermost scope is last. The global scope (index 0) is never popped.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
    next_location: u32,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
            next_location: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn exit_scope(&mut self) -> Result<(), SymbolError> {
        if self.scopes.len() == 1 {
            return Err(SymbolError::GlobalScope);
        }
        self.scopes.pop();
        Ok(())
    }

    /// Declares `name` in the innermost scope with the next memory location.
    pub fn add(&mut self, name: &str, ty: &str) -> Result<&Symbol, SymbolError> {
        let location = self.next_location;
        let scope = self
            .scopes
            .last_mut()
            .expect("global scope is never popped");
        if scope.contains_key(name) {
            return Err(SymbolError::AlreadyDeclared(name.to_string()));
        }
        self.next_location += 1;
        Ok(scope.entry(name.to_string()).or_insert(Symbol {
            name: name.to_string(),
            ty: ty.to_string(),
            memory_location: location,
            is_constant: false,
        }))
    }

    /// Innermost to outermost.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Adds every identifier not yet visible, with [`UNDEFINED_TYPE`].
    /// Returns how many were added.
    pub fn register_identifiers(&mut self, tokens: &[Token]) -> usize {
        let mut added = 0;
        for tok in tokens.iter().filter(|t| t.kind == IDENTIFIER) {
            if self.lookup(&tok.lexeme).is_none() && self.add(&tok.lexeme, UNDEFINED_TYPE).is_ok()
            {
                added += 1;
            }
        }
        added
    }

    /// Outermost scope first, each scope by memory location.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut out = Vec::new();
        for scope in &self.scopes {
            let mut syms: Vec<&Symbol> = scope.values().collect();
            syms.sort_by_key(|s| s.memory_location);
            out.extend(syms);
        }
        out
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol Table Contents:")?;
        for sym in self.symbols() {
            writeln!(f, "{sym}")?;
        }
        Ok(())
    }
}
