// src/lexer/tables/mod.rs
pub mod build;
pub mod dfa;
pub mod io;
pub mod nfa;
pub mod patterns;
pub mod tokens;

// Re-exports to keep the external API flat.
pub use build::{build_dfa, build_tables, epsilon_closure, move_on};
pub use dfa::{Accept, Dfa, DfaState, Transition, symbol_label};
pub use io::{dfa_to_json, load_dfa_json_bytes, save_dfa_json};
pub use nfa::{Fragment, Nfa, StateId};
pub use tokens::{CombinedNfa, DefineError, TokenDefinition, TokenSet};
