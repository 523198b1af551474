// src/lexer/grammar.rs
// Token list for FOS source files, in priority order.

use super::tables::{
    TokenSet,
    patterns,
    tokens::{ALPHANUM, DECIMAL_LITERAL},
};

/// Fixed-text tokens, in declaration order.
pub const KEYWORDS: &[(&str, &str)] = &[
    ("INT", "INT"),
    ("DECIMAL", "DECIMAL"),
    ("BOOL", "BOOL"),
    ("CHAR", "CHAR"),
    ("input", "input"),
    ("output", "output"),
];

pub const OPERATORS: &[(&str, &str)] = &[
    ("plus", "+"),
    ("minus", "-"),
    ("mult", "*"),
    ("div", "/"),
    ("mod", "%"),
    ("exp", "^"),
    ("lparen", "("),
    ("rparen", ")"),
    ("semicolon", ";"),
    ("assign", "="),
];

pub const STRING_LITERAL: &str = "string_literal";

fn define_text(set: &mut TokenSet, name: &str, text: &str) {
    let fragment = set
        .nfa_mut()
        .literal_str(text)
        .expect("token text is non-empty");
    set.define(name, fragment)
        .expect("fresh fragment accept state is unstamped");
}

/// Keywords, string and decimal literals, operators, then the generic
/// alphanumeric run last so every fixed token outranks it. Comments are
/// skipped by the scanner and have no entry here.
pub fn fos_token_set() -> TokenSet {
    let mut set = TokenSet::new();
    for &(name, text) in KEYWORDS {
        define_text(&mut set, name, text);
    }
    set.define_with(STRING_LITERAL, patterns::string_literal)
        .expect("fresh fragment accept state is unstamped");
    set.define_with(DECIMAL_LITERAL, patterns::decimal_literal)
        .expect("fresh fragment accept state is unstamped");
    for &(name, text) in OPERATORS {
        define_text(&mut set, name, text);
    }
    set.define_with(ALPHANUM, patterns::alphanumeric)
        .expect("fresh fragment accept state is unstamped");
    set
}
