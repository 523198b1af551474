// src/bin/fuzz_lex.rs
// Generate random-but-valid FOS inputs and check lexer invariants.
//   - FUZZ_ITERS=n      number of cases (default 200)
//   - FUZZ_LEN=n        target bytes per case (default 4096)
//   - FUZZ_SEED=n       base seed (default 42)
//   - FUZZ_DIR=dir      where failing cases are saved (default "fuzz-cases")
//   - FUZZ_INPUT=path   replay a saved case instead of generating

use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result, bail};
use foslex::{
    dev::generator::gen_valid_source,
    lexer::{Lexer, Token, fos_lexer},
};
use rand::{SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn save_case(dir: &str, seed: u64, src: &str, why: &str) -> PathBuf {
    let _ = fs::create_dir_all(dir);
    let path = Path::new(dir).join(format!("fuzz_seed{seed}_n{}.fos", src.len()));
    fs::write(&path, src.as_bytes()).ok();
    let meta = serde_json::json!({
        "seed": seed,
        "bytes": src.len(),
        "failure": why,
        "replay": format!("FUZZ_INPUT={} cargo run --bin fuzz_lex", path.display()),
    });
    if let Ok(mut f) = fs::File::create(path.with_extension("json")) {
        let _ = writeln!(f, "{}", serde_json::to_string_pretty(&meta).unwrap_or_default());
    }
    path
}

/// Lexemes joined by single spaces must re-lex to the same kinds and text.
fn relex_matches(lexer: &Lexer, tokens: &[Token]) -> bool {
    let joined: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    let again = lexer.tokenize(&joined.join(" "));
    again.errors.is_empty()
        && again.tokens.len() == tokens.len()
        && again
            .tokens
            .iter()
            .zip(tokens)
            .all(|(a, b)| a.kind == b.kind && a.lexeme == b.lexeme)
}

fn check(lexer: &Lexer, src: &str) -> Result<usize, String> {
    let out = lexer.tokenize(src);
    if let Some(e) = out.errors.first() {
        return Err(format!("unexpected diagnostic: {e}"));
    }
    let lazy: Vec<Token> = lexer
        .scan(src)
        .collect::<Result<_, _>>()
        .map_err(|e| format!("lazy scan diagnostic: {e}"))?;
    if lazy != out.tokens {
        return Err("lazy and eager scans disagree".into());
    }
    if out.tokens.windows(2).any(|w| w[0].line > w[1].line) {
        return Err("line numbers go backwards".into());
    }
    if !relex_matches(lexer, &out.tokens) {
        return Err("re-lexing joined lexemes changed the stream".into());
    }
    Ok(out.tokens.len())
}

fn main() -> Result<()> {
    env_logger::init();
    let lexer = fos_lexer();

    if let Ok(path) = env::var("FUZZ_INPUT") {
        let src = fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
        match check(&lexer, &src) {
            Ok(n) => println!("[fuzz] replay ok: {n} tokens"),
            Err(why) => bail!("replay of {path} failed: {why}"),
        }
        return Ok(());
    }

    let iters = env_u64("FUZZ_ITERS", 200);
    let len = env_u64("FUZZ_LEN", 4096) as usize;
    let seed = env_u64("FUZZ_SEED", 42);
    let dir = env::var("FUZZ_DIR").unwrap_or_else(|_| "fuzz-cases".to_string());

    let t0 = Instant::now();
    let mut total_tokens = 0usize;
    for i in 0..iters {
        let case_seed = seed.wrapping_add(i);
        let mut rng = StdRng::seed_from_u64(case_seed);
        let src = gen_valid_source(&mut rng, len);
        match check(&lexer, &src) {
            Ok(n) => total_tokens += n,
            Err(why) => {
                let saved = save_case(&dir, case_seed, &src, &why);
                bail!("case {i} (seed {case_seed}) failed: {why}\n  saved: {}", saved.display());
            }
        }
    }
    println!(
        "[fuzz] {iters} cases ok, {total_tokens} tokens, took {} ms",
        t0.elapsed().as_millis()
    );
    Ok(())
}
