// src/lexer/tables/tokens.rs
use thiserror::Error;

use super::nfa::{Fragment, Nfa, StateId};

// Tags the scanner treats specially.
pub const ALPHANUM: &str = "alphanum";
pub const IDENTIFIER: &str = "identifier";
pub const INT_LITERAL: &str = "int_literal";
pub const DECIMAL_LITERAL: &str = "decimal_literal";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefineError {
    #[error("accept state {state} of `{token}` is already stamped as `{existing}`")]
    AlreadyStamped {
        token: String,
        existing: String,
        state: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDefinition {
    pub name: String,
    pub fragment: Fragment,
    /// 1-based declaration order; lower wins.
    pub priority: u32,
}

/// Ordered token definitions sharing one state arena.
#[derive(Debug, Default)]
pub struct TokenSet {
    nfa: Nfa,
    defs: Vec<TokenDefinition>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena to build fragments in before handing them to [`TokenSet::define`].
    pub fn nfa_mut(&mut self) -> &mut Nfa {
        &mut self.nfa
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    pub fn definitions(&self) -> &[TokenDefinition] {
        &self.defs
    }

    /// Stamps `fragment.accept` with `name` and the next priority.
    pub fn define(&mut self, name: &str, fragment: Fragment) -> Result<u32, DefineError> {
        let priority = self.defs.len() as u32 + 1;
        if !self.nfa.stamp(fragment.accept, name, priority) {
            let existing = self
                .nfa
                .state(fragment.accept)
                .stamp
                .as_ref()
                .map(|s| s.token.clone())
                .unwrap_or_default();
            log::warn!("refusing to restamp state {} as `{name}`", fragment.accept.0);
            return Err(DefineError::AlreadyStamped {
                token: name.to_string(),
                existing,
                state: fragment.accept.0,
            });
        }
        self.defs.push(TokenDefinition {
            name: name.to_string(),
            fragment,
            priority,
        });
        Ok(priority)
    }

    /// Builds the fragment in this set's arena and defines it.
    pub fn define_with(
        &mut self,
        name: &str,
        build: impl FnOnce(&mut Nfa) -> Fragment,
    ) -> Result<u32, DefineError> {
        let fragment = build(&mut self.nfa);
        self.define(name, fragment)
    }

    /// Fans a fresh root out to every definition. Acceptance is per stamped
    /// state; there is no single exit.
    pub fn combine(mut self) -> CombinedNfa {
        let root = self.nfa.add_state();
        for def in &self.defs {
            self.nfa.add_epsilon(root, def.fragment.start);
        }
        log::debug!(
            "[tables] combined {} definitions over {} NFA states",
            self.defs.len(),
            self.nfa.len()
        );
        CombinedNfa {
            nfa: self.nfa,
            root,
            definitions: self.defs,
        }
    }
}

#[derive(Debug)]
pub struct CombinedNfa {
    pub nfa: Nfa,
    pub root: StateId,
    pub definitions: Vec<TokenDefinition>,
}
