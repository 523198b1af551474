//! Size sweep tests for the lexer:
//!  - all target lengths < 32 (0..=31), runs by default
//!  - powers of two from 32 up to ~1,000,000, opt-in (ignored by default)
//!
//! Sources come from the shared generator (same as fuzz_lex/perf_one), which
//! only emits input that lexes without diagnostics.

use foslex::{
    dev::generator::gen_valid_source,
    lexer::{Lexer, fos_lexer},
};
use rand::{SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

fn run_one(lexer: &Lexer, target_len: usize, seed: u64) {
    // Derive a per-length seed for reproducibility across iterations.
    let mut rng =
        StdRng::seed_from_u64(seed ^ (target_len as u64).wrapping_mul(0x9E3779B97F4A7C15));
    let src = gen_valid_source(&mut rng, target_len);
    assert!(src.len() >= target_len);

    let out = lexer.tokenize(&src);
    assert!(
        out.errors.is_empty(),
        "target_len={target_len} seed={seed}: {:?}\n--- source ---\n{src}",
        out.errors
    );

    let newlines = src.bytes().filter(|&b| b == b'\n').count();
    for w in out.tokens.windows(2) {
        assert!(w[0].line <= w[1].line, "lines went backwards at {:?}", w[1]);
    }
    if let Some(last) = out.tokens.last() {
        assert!(last.line <= newlines + 1);
    }

    // Re-lexing the emitted lexemes reproduces the stream.
    let joined: Vec<&str> = out.tokens.iter().map(|t| t.lexeme.as_str()).collect();
    let again = lexer.tokenize(&joined.join("\n"));
    assert!(again.errors.is_empty());
    assert_eq!(again.tokens.len(), out.tokens.len());
    for (a, b) in again.tokens.iter().zip(&out.tokens) {
        assert_eq!((&a.kind, &a.lexeme), (&b.kind, &b.lexeme));
    }
}

/// Sweep 0..=31 target lengths. (Fast; runs by default.)
#[test]
fn size_sweep_small_targets() {
    let lexer = fos_lexer();
    let seed = env_u64("SIZE_SWEEP_SEED", 42);
    for len in 0..=31 {
        run_one(&lexer, len, seed);
    }
}

/// Powers of two from 32 up to ~1,000,000 (capped by SIZE_SWEEP_MAX).
/// Ignored by default; opt-in when needed.
#[test]
#[ignore]
fn size_sweep_powers_of_two() {
    let lexer = fos_lexer();
    let seed = env_u64("SIZE_SWEEP_SEED", 42);
    let max_len = env_usize("SIZE_SWEEP_MAX", 1_000_000);

    let mut n = 32usize;
    while n <= max_len {
        run_one(&lexer, n, seed);
        eprintln!("[size_sweep] ok: target_len={n}");
        n = n.saturating_mul(2);
    }
}
