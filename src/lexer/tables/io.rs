// src/lexer/tables/io.rs
use std::{
    io::{BufWriter, Write},
    time::Instant,
};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{
    dfa::{ALPHABET_LEN, Accept, Dfa, NO_STATE},
    nfa::{PRINTABLE_FIRST, StateId},
};

// -------------------- JSON (de)serialization --------------------

#[serde_as]
#[derive(Serialize, Deserialize)]
struct StateDisk {
    origin: Vec<u32>,
    #[serde_as(as = "[_; ALPHABET_LEN]")]
    next: [u32; ALPHABET_LEN],
    token: Option<String>,
    priority: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct DfaDisk {
    start: u32,
    states: Vec<StateDisk>,
}

impl From<&Dfa> for DfaDisk {
    fn from(d: &Dfa) -> Self {
        Self {
            start: d.start(),
            states: d
                .states()
                .iter()
                .map(|s| StateDisk {
                    origin: s.origin.iter().map(|id| id.0).collect(),
                    next: s.next,
                    token: s.accept.as_ref().map(|a| a.token.clone()),
                    priority: s.accept.as_ref().map(|a| a.priority),
                })
                .collect(),
        }
    }
}

impl DfaDisk {
    fn into_dfa(self) -> Result<Dfa, String> {
        let n = self.states.len();
        if n == 0 {
            return Err("table has no states".into());
        }
        if self.start as usize >= n {
            return Err(format!("start state {} out of range (n={n})", self.start));
        }

        let mut dfa = Dfa::new();
        for (i, s) in self.states.iter().enumerate() {
            let accept = match (&s.token, s.priority) {
                (Some(token), Some(priority)) => Some(Accept {
                    token: token.clone(),
                    priority,
                }),
                (None, None) => None,
                _ => return Err(format!("state {i}: token and priority must be set together")),
            };
            let mut origin: Vec<StateId> = s.origin.iter().map(|&id| StateId(id)).collect();
            origin.sort_unstable();
            let (id, inserted) = dfa.insert(origin.into_boxed_slice(), accept);
            if !inserted {
                return Err(format!("state {i}: duplicate origin set of state {id}"));
            }
        }
        for (i, s) in self.states.iter().enumerate() {
            for (sym, &to) in s.next.iter().enumerate() {
                if to == NO_STATE {
                    continue;
                }
                if to as usize >= n {
                    return Err(format!("state {i}: edge to {to} out of range (n={n})"));
                }
                dfa.set_edge(i as u32, PRINTABLE_FIRST + sym as u8, to);
            }
        }
        dfa.set_start(self.start);
        Ok(dfa)
    }
}

pub fn save_dfa_json(path: &std::path::Path, dfa: &Dfa) -> std::io::Result<()> {
    let instant = Instant::now();
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, &DfaDisk::from(dfa))?;
    let flush = w.flush();
    log::debug!(
        "Saved {} DFA states to {} in {} ms",
        dfa.state_count(),
        path.display(),
        instant.elapsed().as_millis()
    );
    flush
}

pub fn dfa_to_json(dfa: &Dfa) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&DfaDisk::from(dfa))
}

pub fn load_dfa_json_bytes(data: &[u8]) -> Result<Dfa, String> {
    serde_json::from_slice::<DfaDisk>(data)
        .map_err(|e| format!("Failed to parse DFA JSON: {e}"))?
        .into_dfa()
}
