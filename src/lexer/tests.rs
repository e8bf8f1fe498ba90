//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Number-shaped runs (valid and malformed)
//! - String literals with escape sequences
//! - Punctuation
//! - Comments
//! - Error cases

use super::{
    lexer::{tokenize, unescape_string},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.yul".to_string()))
        .unwrap()
        .iter()
        .map(|x| x.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "let function if switch case default for break continue true false".to_string();
    let tokens = tokenize(source, Some("test.yul".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Function);
    assert_eq!(tokens[2].kind, TokenKind::If);
    assert_eq!(tokens[3].kind, TokenKind::Switch);
    assert_eq!(tokens[4].kind, TokenKind::Case);
    assert_eq!(tokens[5].kind, TokenKind::Default);
    assert_eq!(tokens[6].kind, TokenKind::For);
    assert_eq!(tokens[7].kind, TokenKind::Break);
    assert_eq!(tokens[8].kind, TokenKind::Continue);
    assert_eq!(tokens[9].kind, TokenKind::True);
    assert_eq!(tokens[10].kind, TokenKind::False);
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo return byte address bool u256 pop _x $y a.b".to_string();
    let tokens = tokenize(source, Some("test.yul".to_string())).unwrap();

    for token in tokens.iter().take(10) {
        assert_eq!(token.kind, TokenKind::Identifier, "{}", token.value);
    }
    assert_eq!(tokens[1].value, "return");
    assert_eq!(tokens[9].value, "a.b");
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0x1f 0 115792089237316195423570985008687907853269984665640564039457584007913129639936".to_string();
    let tokens = tokenize(source, Some("test.yul".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "0x1f");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_malformed_numbers_stay_whole() {
    let source = ".1 1e5 67.235 1e-5".to_string();
    let tokens = tokenize(source, Some("test.yul".to_string())).unwrap();

    assert_eq!(tokens[0].value, ".1");
    assert_eq!(tokens[1].value, "1e5");
    assert_eq!(tokens[2].value, "67.235");
    assert_eq!(tokens[3].value, "1e-5");
    assert!(tokens[..4].iter().all(|x| x.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_typed_literal() {
    assert_eq!(
        kinds("7:u256"),
        vec![TokenKind::Number, TokenKind::Colon, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_assignment_is_colon_then_equals() {
    assert_eq!(
        kinds("x := 1"),
        vec![
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "tab\there" "quote\"d" "hex\x41""#.to_string();
    let tokens = tokenize(source, Some("test.yul".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, r"tab\there");
    assert_eq!(tokens[2].value, r#"quote\"d"#);
    assert_eq!(tokens[3].value, r"hex\x41");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_unescape_string() {
    assert_eq!(unescape_string("hello"), b"hello".to_vec());
    assert_eq!(unescape_string(r"tab\there"), b"tab\there".to_vec());
    assert_eq!(unescape_string(r#"quote\"d\\"#), b"quote\"d\\".to_vec());
    assert_eq!(unescape_string(r"hex\x41\x4"), b"hexA\x04".to_vec());
}

#[test]
fn test_unescape_string_high_bytes() {
    assert_eq!(unescape_string(r"\xff\x80"), vec![0xff, 0x80]);
    assert_eq!(unescape_string(&r"\xff".repeat(20)).len(), 20);
    // Multi-byte source characters count byte by byte.
    assert_eq!(unescape_string("é").len(), 2);
}

#[test]
fn test_unescape_string_keeps_unknown_escapes() {
    assert_eq!(unescape_string(r"\q"), b"\\q".to_vec());
    assert_eq!(unescape_string(r"\xg"), b"\\xg".to_vec());
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } , : -> ="),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Arrow,
            TokenKind::Assignment,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "let x // line comment\n/* block\ncomment */ let y";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("{ let x }".to_string(), Some("test.yul".to_string())).unwrap();

    assert_eq!(tokens[1].span.start.0, 2);
    assert_eq!(tokens[1].span.end.0, 5);
    assert_eq!(tokens[2].span.start.0, 6);
    assert_eq!(*tokens[2].span.start.1, "test.yul");
    assert_eq!(tokens[4].span.start.0, 9);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let result = tokenize("{ let x := @ }".to_string(), Some("test.yul".to_string()));

    let error = result.err().unwrap();
    assert_eq!(error.message(), "Invalid token \"@\".");
    assert_eq!(error.get_position().0, 11);
}

#[test]
fn test_tokenize_deep_nesting_is_linear() {
    let source = "{".repeat(20000) + &"}".repeat(20000);
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens.len(), 40001);
    assert_eq!(*tokens[0].span.start.1, "shell");
}

#[test]
fn test_keyword_description() {
    assert_eq!(TokenKind::Let.describe(), "'let'");
    assert_eq!(TokenKind::Identifier.describe(), "identifier");
    assert_eq!(TokenKind::EOF.describe(), "end of source");
}
