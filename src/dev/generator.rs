// src/dev/generator.rs
// Random-but-valid FOS source for fuzzing, sweeps and perf runs.

use rand::Rng;

use crate::lexer::grammar::{KEYWORDS, OPERATORS};

const IDENT_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
// Printable, no quote: safe inside a string literal.
const STRING_CHARS: &[u8] = b"abc XYZ 019 +-*/%^();=!?.,:_#@";

fn push_from<R: Rng>(rng: &mut R, out: &mut String, alphabet: &[u8], min: usize, max: usize) {
    let n = rng.random_range(min..=max);
    for _ in 0..n {
        out.push(alphabet[rng.random_range(0..alphabet.len())] as char);
    }
}

fn push_ws<R: Rng>(rng: &mut R, out: &mut String) {
    match rng.random_range(0u32..10) {
        0..=5 => out.push(' '),
        6..=7 => out.push('\n'),
        8 => out.push('\t'),
        _ => out.push_str("\r\n"),
    }
}

/// Appends at least `target_len` bytes of source that lexes without
/// diagnostics. Every piece is followed by whitespace so neighbours never
/// fuse into one run.
pub fn gen_valid_source<R: Rng>(rng: &mut R, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len + target_len / 8 + 8);

    while out.len() < target_len {
        let roll = rng.random_range(0u32..100);
        match roll {
            0..=24 => push_from(rng, &mut out, IDENT_CHARS, 1, 8),
            25..=37 => push_from(rng, &mut out, DIGITS, 1, 6),
            38..=45 => {
                push_from(rng, &mut out, DIGITS, 1, 3);
                out.push('.');
                push_from(rng, &mut out, DIGITS, 1, 8);
            }
            46..=53 => out.push_str(KEYWORDS[rng.random_range(0..KEYWORDS.len())].1),
            54..=59 => {
                out.push('"');
                push_from(rng, &mut out, STRING_CHARS, 0, 12);
                out.push('"');
            }
            60..=64 => {
                out.push_str("//");
                push_from(rng, &mut out, STRING_CHARS, 0, 20);
                out.push('\n');
            }
            65..=69 => {
                out.push_str("/*");
                push_from(rng, &mut out, IDENT_CHARS, 0, 10);
                if rng.random_bool(0.5) {
                    out.push('\n');
                }
                out.push_str("*/");
            }
            70..=99 => out.push_str(OPERATORS[rng.random_range(0..OPERATORS.len())].1),
            _ => unreachable!(),
        }
        push_ws(rng, &mut out);
    }

    out
}
