// src/bin/perf_one.rs
use std::{env, time::Instant};

use foslex::{dev::generator::gen_valid_source, lexer::fos_lexer};
use rand::{SeedableRng, rngs::StdRng};

fn fmt_mib(bytes: u64) -> String {
    let mib = (bytes as f64) / (1024.0 * 1024.0);
    format!("{mib:.2} MiB")
}

fn throughput_mibs(bytes: u64, ms: f64) -> f64 {
    if ms <= 0.0 {
        return 0.0;
    }
    (bytes as f64) / (1024.0 * 1024.0) / (ms / 1_000.0)
}

fn parse_target_len() -> usize {
    // Default: 10,000,000 characters
    env::var("PERF_ONE_LEN")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000_000)
}

fn parse_seed() -> u64 {
    env::var("PERF_ONE_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42)
}

fn main() {
    env_logger::init();

    let t_build = Instant::now();
    let lexer = fos_lexer();
    println!(
        "[perf_one] tables: {} DFA states in {:.2} ms",
        lexer.dfa().state_count(),
        t_build.elapsed().as_secs_f64() * 1_000.0
    );

    let mut rng = StdRng::seed_from_u64(parse_seed());
    let src = gen_valid_source(&mut rng, parse_target_len());
    let bytes = src.len() as u64;

    let t_lex = Instant::now();
    let out = lexer.tokenize(&src);
    let ms = t_lex.elapsed().as_secs_f64() * 1_000.0;

    println!(
        "[perf_one] {}: {} tokens, {} diagnostics in {:.2} ms ({:.1} MiB/s)",
        fmt_mib(bytes),
        out.tokens.len(),
        out.errors.len(),
        ms,
        throughput_mibs(bytes, ms)
    );
}
