// src/bin/gen_tables.rs
// Build the FOS DFA once and write it to JSON.
// Usage:
//   cargo run --bin gen_tables                # writes tables/fos_dfa.json
//   cargo run --bin gen_tables -- /path/out.json

use std::{env, fs, path::Path, time::Instant};

use anyhow::{Context, Result};
use foslex::lexer::{
    grammar::fos_token_set,
    tables::{build_dfa, save_dfa_json},
};

fn main() -> Result<()> {
    env_logger::init();

    let out = env::args()
        .nth(1)
        .unwrap_or_else(|| "tables/fos_dfa.json".to_string());
    let out_path = Path::new(&out);

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    println!("[gen_tables] building FOS tables…");
    let t0 = Instant::now();
    let combined = fos_token_set().combine();
    let nfa_states = combined.nfa.len();
    let dfa = build_dfa(&combined);

    let finals = dfa.states().iter().filter(|s| s.is_final()).count();
    let edges = dfa.transitions().count();
    println!(
        "[gen_tables] nfa = {} states, dfa = {} states ({} final), {} edges, took {} ms",
        nfa_states,
        dfa.state_count(),
        finals,
        edges,
        t0.elapsed().as_millis()
    );

    save_dfa_json(out_path, &dfa)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!("[gen_tables] wrote {}", out_path.display());
    Ok(())
}
