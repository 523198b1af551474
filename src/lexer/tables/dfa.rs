// src/lexer/tables/dfa.rs
use std::fmt::Write as _;

use hashbrown::HashMap;

use super::nfa::{PRINTABLE_FIRST, PRINTABLE_LAST, StateId};

/// Number of edge symbols per state (printable ASCII). Newline and other
/// bytes are never modeled as edges.
pub const ALPHABET_LEN: usize = (PRINTABLE_LAST - PRINTABLE_FIRST) as usize + 1;

/// "No edge" marker in a transition row.
pub const NO_STATE: u32 = u32::MAX;

#[inline]
pub fn symbol_index(b: u8) -> Option<usize> {
    if (PRINTABLE_FIRST..=PRINTABLE_LAST).contains(&b) {
        Some((b - PRINTABLE_FIRST) as usize)
    } else {
        None
    }
}

/// Human-readable edge label used in table dumps.
pub fn symbol_label(b: u8) -> String {
    match b {
        b' ' => "space".to_string(),
        b'\n' => "\\n".to_string(),
        _ => (b as char).to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accept {
    pub token: String,
    pub priority: u32,
}

#[derive(Debug, Clone)]
pub struct DfaState {
    pub id: u32,
    /// Sorted NFA state ids this state stands for; its identity.
    pub origin: Box<[StateId]>,
    pub next: [u32; ALPHABET_LEN],
    /// Fixed at creation.
    pub accept: Option<Accept>,
}

impl DfaState {
    #[inline]
    pub fn is_final(&self) -> bool {
        self.accept.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.accept.as_ref().map(|a| a.token.as_str())
    }

    #[inline]
    pub fn next(&self, b: u8) -> Option<u32> {
        let to = self.next[symbol_index(b)?];
        (to != NO_STATE).then_some(to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: u32,
    pub symbol: u8,
    pub to: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: u32,
    by_origin: HashMap<Box<[StateId]>, u32>,
}

impl Dfa {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(id, inserted)`. An existing state with the same origin set is
    /// reused and `accept` is ignored.
    pub fn insert(&mut self, origin: Box<[StateId]>, accept: Option<Accept>) -> (u32, bool) {
        if let Some(&id) = self.by_origin.get(&origin) {
            return (id, false);
        }
        let id = self.states.len() as u32;
        self.by_origin.insert(origin.clone(), id);
        self.states.push(DfaState {
            id,
            origin,
            next: [NO_STATE; ALPHABET_LEN],
            accept,
        });
        (id, true)
    }

    pub fn set_edge(&mut self, from: u32, b: u8, to: u32) {
        if let Some(i) = symbol_index(b) {
            self.states[from as usize].next[i] = to;
        }
    }

    pub fn set_start(&mut self, id: u32) {
        self.start = id;
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, id: u32) -> &DfaState {
        &self.states[id as usize]
    }

    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    #[inline]
    pub fn step(&self, id: u32, b: u8) -> Option<u32> {
        self.states.get(id as usize)?.next(b)
    }

    /// Exact origin-set lookup; `origin` must be sorted.
    pub fn state_by_origin(&self, origin: &[StateId]) -> Option<&DfaState> {
        self.by_origin.get(origin).map(|&id| self.state(id))
    }

    /// Every edge, by state id then symbol.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.states.iter().flat_map(|s| {
            s.next.iter().enumerate().filter_map(move |(i, &to)| {
                (to != NO_STATE).then(|| Transition {
                    from: s.id,
                    symbol: PRINTABLE_FIRST + i as u8,
                    to,
                })
            })
        })
    }

    pub fn transition_table(&self) -> String {
        let mut out = String::from("State\tInput\tNextState\n");
        for t in self.transitions() {
            let _ = writeln!(out, "{}\t{}\t{}", t.from, symbol_label(t.symbol), t.to);
        }
        out
    }
}
