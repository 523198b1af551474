// src/lexer/tables/nfa.rs
use hashbrown::HashSet;

/// First and last printable ASCII byte; the scanner alphabet.
pub const PRINTABLE_FIRST: u8 = 32;
pub const PRINTABLE_LAST: u8 = 126;

/// Index of a state inside its owning [`Nfa`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub u32);

impl StateId {
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Accept stamp: which token a state recognizes and how strongly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub token: String,
    pub priority: u32,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    /// (symbol, destination); a symbol may appear more than once.
    pub edges: Vec<(u8, StateId)>,
    pub epsilon: Vec<StateId>,
    pub stamp: Option<Stamp>,
}

impl State {
    pub fn targets(&self, symbol: u8) -> impl Iterator<Item = StateId> + '_ {
        self.edges
            .iter()
            .filter(move |(c, _)| *c == symbol)
            .map(|&(_, to)| to)
    }
}

/// One entry, one exit. Composition links fragments with epsilon edges and
/// never copies their states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub accept: StateId,
}

/// State arena. It is also the id allocator: ids are handed out in creation
/// order and are only meaningful inside this arena.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    states: Vec<State>,
}

impl Nfa {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.idx()]
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId(i as u32), s))
    }

    pub fn add_state(&mut self) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(State::default());
        id
    }

    pub fn add_edge(&mut self, from: StateId, symbol: u8, to: StateId) {
        self.states[from.idx()].edges.push((symbol, to));
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from.idx()].epsilon.push(to);
    }

    /// Returns false if the state already carries a stamp (the old one is kept).
    pub fn stamp(&mut self, id: StateId, token: &str, priority: u32) -> bool {
        let slot = &mut self.states[id.idx()].stamp;
        if slot.is_some() {
            return false;
        }
        *slot = Some(Stamp {
            token: token.to_string(),
            priority,
        });
        true
    }

    // ---------------- fragment algebra ----------------

    pub fn literal(&mut self, c: u8) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_edge(start, c, accept);
        Fragment { start, accept }
    }

    /// Chain of literals; `None` for the empty string.
    pub fn literal_str(&mut self, s: &str) -> Option<Fragment> {
        let mut out: Option<Fragment> = None;
        for &b in s.as_bytes() {
            let f = self.literal(b);
            out = Some(match out {
                None => f,
                Some(acc) => self.concat(acc, f),
            });
        }
        out
    }

    pub fn concat(&mut self, a: Fragment, b: Fragment) -> Fragment {
        self.add_epsilon(a.accept, b.start);
        Fragment {
            start: a.start,
            accept: b.accept,
        }
    }

    pub fn union(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_epsilon(start, a.start);
        self.add_epsilon(start, b.start);
        self.add_epsilon(a.accept, accept);
        self.add_epsilon(b.accept, accept);
        Fragment { start, accept }
    }

    /// Zero or more.
    pub fn star(&mut self, a: Fragment) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_epsilon(start, a.start);
        self.add_epsilon(start, accept);
        self.add_epsilon(a.accept, a.start);
        self.add_epsilon(a.accept, accept);
        Fragment { start, accept }
    }

    /// One or more: `a` followed by `star(a)`, sharing `a`'s states.
    pub fn plus(&mut self, a: Fragment) -> Fragment {
        let rest = self.star(a);
        self.concat(a, rest)
    }

    /// Left-folded union of one literal per symbol; `None` if `symbols` is empty.
    pub fn one_of(&mut self, symbols: impl IntoIterator<Item = u8>) -> Option<Fragment> {
        let mut out: Option<Fragment> = None;
        for c in symbols {
            let f = self.literal(c);
            out = Some(match out {
                None => f,
                Some(acc) => self.union(acc, f),
            });
        }
        out
    }

    pub fn range(&mut self, lo: u8, hi: u8) -> Option<Fragment> {
        self.one_of(lo..=hi)
    }

    pub fn any_char_except(&mut self, excluded: u8) -> Option<Fragment> {
        self.one_of((PRINTABLE_FIRST..=PRINTABLE_LAST).filter(|&c| c != excluded))
    }

    /// Printable ASCII plus newline.
    pub fn any_char(&mut self) -> Fragment {
        let printable = self.one_of(PRINTABLE_FIRST..=PRINTABLE_LAST);
        let newline = self.literal(b'\n');
        match printable {
            Some(p) => self.union(p, newline),
            None => newline,
        }
    }

    // ---------------- simulation ----------------

    fn close(&self, set: &mut HashSet<StateId>) {
        let mut stack: Vec<StateId> = set.iter().copied().collect();
        while let Some(s) = stack.pop() {
            for &t in &self.state(s).epsilon {
                if set.insert(t) {
                    stack.push(t);
                }
            }
        }
    }

    /// Whether `fragment` accepts exactly `input` (reaches its accept state).
    pub fn matches(&self, fragment: Fragment, input: &str) -> bool {
        let mut current: HashSet<StateId> = HashSet::new();
        current.insert(fragment.start);
        self.close(&mut current);
        for &b in input.as_bytes() {
            let mut next: HashSet<StateId> = current
                .iter()
                .flat_map(|&s| self.state(s).targets(b))
                .collect();
            if next.is_empty() {
                return false;
            }
            self.close(&mut next);
            current = next;
        }
        current.contains(&fragment.accept)
    }
}
