//! Scanner behaviour over the FOS grammar and a few hand-built token sets.

use foslex::lexer::{
    LexError, Lexer, Token,
    decimal::round_half_up,
    fos_lexer,
    tables::{TokenSet, patterns, tokens::DECIMAL_LITERAL},
};
use pretty_assertions::assert_eq;

fn tok(kind: &str, lexeme: &str, line: usize) -> Token {
    Token::new(kind, lexeme, line)
}

fn kinds_and_lexemes(lexer: &Lexer, src: &str) -> Vec<(String, String)> {
    lexer
        .tokenize(src)
        .tokens
        .into_iter()
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

#[test]
fn end_to_end_statement() {
    let lexer = fos_lexer();
    let out = lexer.tokenize("x = 12 + 3.14000;\n// comment\n");
    assert_eq!(
        out.tokens,
        vec![
            tok("identifier", "x", 1),
            tok("assign", "=", 1),
            tok("int_literal", "12", 1),
            tok("plus", "+", 1),
            tok("decimal_literal", "3.14000", 1),
            tok("semicolon", ";", 1),
        ]
    );
    assert!(out.errors.is_empty());
}

#[test]
fn longest_match_wins() {
    let lexer = fos_lexer();
    assert_eq!(
        kinds_and_lexemes(&lexer, "123"),
        vec![("int_literal".to_string(), "123".to_string())]
    );

    let mut set = TokenSet::new();
    set.define_with("digit", patterns::int_literal).expect("define");
    set.define_with("number", |nfa| {
        let d = patterns::int_literal(nfa);
        nfa.plus(d)
    })
    .expect("define");
    let lexer = Lexer::from_tokens(set);
    assert_eq!(
        kinds_and_lexemes(&lexer, "123 7"),
        vec![
            ("number".to_string(), "123".to_string()),
            ("digit".to_string(), "7".to_string()),
        ]
    );
}

#[test]
fn decimals_are_rounded_to_five_places() {
    let lexer = fos_lexer();
    let cases = [
        ("1.234565", "1.23457"),
        ("3.1", "3.10000"),
        ("0.000005", "0.00001"),
        ("0.000004", "0.00000"),
        ("2.999999", "3.00000"),
        ("007.5", "7.50000"),
        ("12.34567", "12.34567"),
    ];
    for (src, want) in cases {
        let out = lexer.tokenize(src);
        assert!(out.errors.is_empty(), "{src}: {:?}", out.errors);
        assert_eq!(out.tokens, vec![tok("decimal_literal", want, 1)], "{src}");
    }
}

#[test]
fn decimal_rounding_helper() {
    assert_eq!(round_half_up("1.234565", 5).as_deref(), Some("1.23457"));
    assert_eq!(round_half_up("-1.234565", 5).as_deref(), Some("-1.23457"));
    assert_eq!(round_half_up("-0.000001", 5).as_deref(), Some("0.00000"));
    assert_eq!(round_half_up("15e-1", 2).as_deref(), Some("1.50"));
    assert_eq!(round_half_up("2.5", 0).as_deref(), Some("3"));
    assert_eq!(round_half_up(".5", 1).as_deref(), Some("0.5"));
    for bad in ["", ".", "1.2.3", "abc", "1e", "1_0.5", "+"] {
        assert_eq!(round_half_up(bad, 5), None, "{bad:?}");
    }
}

#[test]
fn invalid_decimal_still_emits_original_lexeme() {
    let mut set = TokenSet::new();
    set.define_with(DECIMAL_LITERAL, |nfa| {
        nfa.literal_str("1.2.3").expect("non-empty")
    })
    .expect("define");
    let lexer = Lexer::from_tokens(set);

    let items: Vec<_> = lexer.scan("1.2.3").collect();
    assert_eq!(
        items,
        vec![
            Err(LexError::InvalidDecimalLiteral {
                line: 1,
                lexeme: "1.2.3".into(),
            }),
            Ok(tok(DECIMAL_LITERAL, "1.2.3", 1)),
        ]
    );
}

#[test]
fn alphanumeric_runs_are_reclassified() {
    let lexer = fos_lexer();
    assert_eq!(lexer.tokenize("abc").tokens, vec![tok("identifier", "abc", 1)]);
    assert_eq!(lexer.tokenize("123").tokens, vec![tok("int_literal", "123", 1)]);

    let out = lexer.tokenize("a1b2");
    assert!(out.tokens.is_empty());
    assert_eq!(
        out.errors,
        vec![LexError::InvalidIdentifier {
            line: 1,
            lexeme: "a1b2".into(),
        }]
    );

    let out = lexer.tokenize("x Abc y");
    assert_eq!(out.tokens, vec![tok("identifier", "x", 1), tok("identifier", "y", 1)]);
    assert_eq!(out.errors.len(), 1);
}

#[test]
fn keywords_outrank_identifiers_only_at_equal_length() {
    let lexer = fos_lexer();
    assert_eq!(
        kinds_and_lexemes(&lexer, "input inputs INT output"),
        vec![
            ("input".to_string(), "input".to_string()),
            ("identifier".to_string(), "inputs".to_string()),
            ("INT".to_string(), "INT".to_string()),
            ("output".to_string(), "output".to_string()),
        ]
    );
}

#[test]
fn strings_and_operators() {
    let lexer = fos_lexer();
    let out = lexer.tokenize("output \"hi there; */\";\n(a % b) ^ c - d * e / f");
    assert!(out.errors.is_empty(), "{:?}", out.errors);
    let kinds: Vec<&str> = out.tokens.iter().map(|t| t.kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec![
            "output",
            "string_literal",
            "semicolon",
            "lparen",
            "identifier",
            "mod",
            "identifier",
            "rparen",
            "exp",
            "identifier",
            "minus",
            "identifier",
            "mult",
            "identifier",
            "div",
            "identifier",
        ]
    );
    assert_eq!(out.tokens[1].lexeme, "\"hi there; */\"");
    assert_eq!(out.tokens[3].line, 2);
}

#[test]
fn lines_are_tracked_through_whitespace_and_comments() {
    let lexer = fos_lexer();
    let out = lexer.tokenize("a\nb\n\nc /* one\ntwo\n */ d // tail\ne");
    let lines: Vec<(String, usize)> = out.tokens.into_iter().map(|t| (t.lexeme, t.line)).collect();
    assert_eq!(
        lines,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 4),
            ("d".to_string(), 6),
            ("e".to_string(), 7),
        ]
    );
    assert!(out.errors.is_empty());
}

#[test]
fn comments_hug_tokens() {
    let lexer = fos_lexer();
    assert_eq!(
        kinds_and_lexemes(&lexer, "a//c\nb/**/c/d"),
        vec![
            ("identifier".to_string(), "a".to_string()),
            ("identifier".to_string(), "b".to_string()),
            ("identifier".to_string(), "c".to_string()),
            ("div".to_string(), "/".to_string()),
            ("identifier".to_string(), "d".to_string()),
        ]
    );
}

#[test]
fn unrecognized_symbols_are_skipped() {
    let lexer = fos_lexer();
    let out = lexer.tokenize("a # b\né c");
    assert_eq!(
        out.tokens,
        vec![
            tok("identifier", "a", 1),
            tok("identifier", "b", 1),
            tok("identifier", "c", 2),
        ]
    );
    assert_eq!(
        out.errors,
        vec![
            LexError::UnrecognizedSymbol { line: 1, symbol: '#' },
            LexError::UnrecognizedSymbol { line: 2, symbol: 'é' },
        ]
    );
}

#[test]
fn unclosed_string_falls_back_to_symbol_recovery() {
    let lexer = fos_lexer();
    let out = lexer.tokenize("\"abc");
    assert_eq!(out.tokens, vec![tok("identifier", "abc", 1)]);
    assert_eq!(
        out.errors,
        vec![LexError::UnrecognizedSymbol { line: 1, symbol: '"' }]
    );
}

#[test]
fn scans_are_restartable() {
    let lexer = fos_lexer();
    let src = "x = 1.5; y a1 z";
    let first: Vec<_> = lexer.scan(src).collect();
    let second: Vec<_> = lexer.scan(src).collect();
    assert_eq!(first, second);

    let mut scanner = lexer.scan(src);
    let head = scanner.next();
    let resumed: Vec<_> = scanner.clone().collect();
    let rest: Vec<_> = scanner.collect();
    assert_eq!(resumed, rest);
    assert_eq!(head, Some(Ok(tok("identifier", "x", 1))));
    assert_eq!(first.len(), rest.len() + 1);
}

#[test]
fn diagnostics_render_with_line_prefix() {
    let e = LexError::InvalidIdentifier {
        line: 3,
        lexeme: "a1".into(),
    };
    assert_eq!(e.to_string(), "Lexical error at line 3: Invalid identifier: a1");
    assert_eq!(e.line(), 3);
    assert!(!e.is_fatal());

    let e = LexError::UnrecognizedSymbol { line: 1, symbol: '#' };
    assert_eq!(e.to_string(), "Lexical error at line 1: Unrecognized symbol: #");

    assert_eq!(
        tok("identifier", "x", 2).to_string(),
        "<identifier, x> at line 2"
    );
}
