// src/main.rs
use std::{env, fs};

use anyhow::{Context, Result};
use foslex::{lexer::fos_lexer, symbols::SymbolTable};

fn main() -> Result<()> {
    env_logger::init();

    let lexer = fos_lexer();
    let dfa = lexer.dfa();

    let dump = env::var("FOSLEX_TABLE").map(|v| v != "0").unwrap_or(true);
    if dump {
        println!("DFA Transition Table:");
        print!("{}", dfa.transition_table());
    }
    println!("Total DFA States: {}", dfa.state_count());

    let path = env::args().nth(1).unwrap_or_else(|| "input.fos".to_string());
    let source = fs::read_to_string(&path).with_context(|| format!("File not found: {path}"))?;

    let out = lexer.tokenize(&source);
    for e in &out.errors {
        eprintln!("{e}");
    }

    println!("\nTokens:");
    for tok in &out.tokens {
        println!("{tok}");
    }

    let mut symbols = SymbolTable::new();
    let added = symbols.register_identifiers(&out.tokens);
    log::debug!("registered {added} identifiers");

    println!("\nSymbol Table:");
    print!("{symbols}");
    Ok(())
}
