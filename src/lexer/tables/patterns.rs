// src/lexer/tables/patterns.rs
// Token grammars built purely from the fragment algebra.

use super::nfa::{Fragment, Nfa};

fn join(nfa: &mut Nfa, parts: &[Fragment]) -> Fragment {
    let mut it = parts.iter().copied();
    let first = it.next().expect("join needs at least one fragment");
    it.fold(first, |acc, f| nfa.concat(acc, f))
}

fn digit(nfa: &mut Nfa) -> Fragment {
    nfa.range(b'0', b'9').expect("non-empty range")
}

/// `//` then anything up to (not including) a newline.
pub fn single_line_comment(nfa: &mut Nfa) -> Fragment {
    let slashes = nfa.literal_str("//").expect("non-empty");
    let body = nfa.any_char_except(b'\n').expect("non-empty set");
    let body = nfa.star(body);
    join(nfa, &[slashes, body])
}

pub fn multi_line_comment(nfa: &mut Nfa) -> Fragment {
    let open = nfa.literal_str("/*").expect("non-empty");
    let body = nfa.any_char();
    let body = nfa.star(body);
    let close = nfa.literal_str("*/").expect("non-empty");
    join(nfa, &[open, body, close])
}

/// `"` then any non-quote run then `"`. Each quote is its own fragment so a
/// lone `"` is never accepted.
pub fn string_literal(nfa: &mut Nfa) -> Fragment {
    let open = nfa.literal(b'"');
    let body = nfa.any_char_except(b'"').expect("non-empty set");
    let body = nfa.star(body);
    let close = nfa.literal(b'"');
    join(nfa, &[open, body, close])
}

/// One or more of `[a-zA-Z0-9]`; split into identifier/int by the scanner.
pub fn alphanumeric(nfa: &mut Nfa) -> Fragment {
    let lower = nfa.range(b'a', b'z').expect("non-empty range");
    let upper = nfa.range(b'A', b'Z').expect("non-empty range");
    let digits = digit(nfa);
    let letters = nfa.union(lower, upper);
    let any = nfa.union(letters, digits);
    nfa.plus(any)
}

/// A single digit.
pub fn int_literal(nfa: &mut Nfa) -> Fragment {
    digit(nfa)
}

/// `digit+ . digit+`
pub fn decimal_literal(nfa: &mut Nfa) -> Fragment {
    let int_part = digit(nfa);
    let int_part = nfa.plus(int_part);
    let dot = nfa.literal(b'.');
    let frac = digit(nfa);
    let frac = nfa.plus(frac);
    join(nfa, &[int_part, dot, frac])
}
