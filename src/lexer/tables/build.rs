// src/lexer/tables/build.rs
use std::{collections::VecDeque, time::Instant};

use hashbrown::HashSet;

use super::{
    dfa::{Accept, Dfa},
    nfa::{Nfa, PRINTABLE_FIRST, PRINTABLE_LAST, StateId},
    tokens::{CombinedNfa, TokenSet},
};

/// All states reachable from `seeds` over epsilon edges, seeds included,
/// sorted so equal sets compare and hash equal.
pub fn epsilon_closure(nfa: &Nfa, seeds: impl IntoIterator<Item = StateId>) -> Vec<StateId> {
    let mut closure: HashSet<StateId> = HashSet::new();
    let mut stack: Vec<StateId> = Vec::new();
    for s in seeds {
        if closure.insert(s) {
            stack.push(s);
        }
    }
    while let Some(s) = stack.pop() {
        for &t in &nfa.state(s).epsilon {
            if closure.insert(t) {
                stack.push(t);
            }
        }
    }
    let mut out: Vec<StateId> = closure.into_iter().collect();
    out.sort_unstable();
    out
}

/// Destinations of `symbol` edges out of `set` (not closed).
pub fn move_on(nfa: &Nfa, set: &[StateId], symbol: u8) -> Vec<StateId> {
    let mut seen: HashSet<StateId> = HashSet::new();
    let mut out = Vec::new();
    for &s in set {
        for t in nfa.state(s).targets(symbol) {
            if seen.insert(t) {
                out.push(t);
            }
        }
    }
    out
}

/// Lowest-priority stamp among `set`, if any.
fn resolve_accept(nfa: &Nfa, set: &[StateId]) -> Option<Accept> {
    set.iter()
        .filter_map(|&s| nfa.state(s).stamp.as_ref())
        .min_by_key(|stamp| stamp.priority)
        .map(|stamp| Accept {
            token: stamp.token.clone(),
            priority: stamp.priority,
        })
}

/// Subset construction over the printable alphabet.
pub fn build_dfa(combined: &CombinedNfa) -> Dfa {
    let t0 = Instant::now();
    let nfa = &combined.nfa;
    let mut dfa = Dfa::new();

    let start_set = epsilon_closure(nfa, [combined.root]);
    let accept = resolve_accept(nfa, &start_set);
    let (start, _) = dfa.insert(start_set.into_boxed_slice(), accept);
    dfa.set_start(start);

    let mut queue: VecDeque<u32> = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for c in PRINTABLE_FIRST..=PRINTABLE_LAST {
            let moved = move_on(nfa, &dfa.state(current).origin, c);
            if moved.is_empty() {
                continue;
            }
            let closure = epsilon_closure(nfa, moved);
            let accept = match dfa.state_by_origin(&closure) {
                Some(_) => None,
                None => resolve_accept(nfa, &closure),
            };
            let (to, inserted) = dfa.insert(closure.into_boxed_slice(), accept);
            if inserted {
                queue.push_back(to);
            }
            dfa.set_edge(current, c, to);
        }
    }

    log::debug!(
        "[tables] subset construction: {} NFA states -> {} DFA states in {} ms",
        nfa.len(),
        dfa.state_count(),
        t0.elapsed().as_millis()
    );
    dfa
}

/// Combine and determinize in one go.
pub fn build_tables(tokens: TokenSet) -> Dfa {
    build_dfa(&tokens.combine())
}
