//! Tests for scanner.rs

use super::*;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = Scanner::new(source);
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan().unwrap();
        if kind == SyntaxKind::EndOfFileToken {
            return kinds;
        }
        kinds.push(kind);
    }
}

#[test]
fn test_scan_subscript() {
    assert_eq!(
        kinds("tuple[int, ...]"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::Identifier,
            SyntaxKind::CommaToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::CloseBracketToken,
        ]
    );
}

#[test]
fn test_scan_dotted_identifier() {
    let mut scanner = Scanner::new("collections.abc.Sequence[str]");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::Identifier));
    assert_eq!(scanner.token_value(), "collections.abc.Sequence");
    assert_eq!(scanner.token_pos(), 0);
    assert_eq!(scanner.token_end(), 24);
    assert_eq!(scanner.scan(), Ok(SyntaxKind::OpenBracketToken));
}

#[test]
fn test_identifier_stops_before_ellipsis() {
    let mut scanner = Scanner::new("int...");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::Identifier));
    assert_eq!(scanner.token_value(), "int");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::DotDotDotToken));
}

#[test]
fn test_scan_numbers() {
    let mut scanner = Scanner::new("42 3.5 1_000 2e3 7");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::IntLiteral));
    assert_eq!(scanner.token_value(), "42");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::FloatLiteral));
    assert_eq!(scanner.token_value(), "3.5");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::IntLiteral));
    assert_eq!(scanner.token_value(), "1000");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::FloatLiteral));
    assert_eq!(scanner.token_value(), "2e3");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::IntLiteral));
}

#[test]
fn test_scan_strings() {
    let mut scanner = Scanner::new(r#"'it\'s' "a\nb""#);
    assert_eq!(scanner.scan(), Ok(SyntaxKind::StringLiteral));
    assert_eq!(scanner.token_value(), "it's");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::StringLiteral));
    assert_eq!(scanner.token_value(), "a\nb");
}

#[test]
fn test_scan_errors() {
    assert_eq!(
        Scanner::new("  'open").scan(),
        Err(ParseError::UnterminatedString { offset: 2 })
    );

    let mut scanner = Scanner::new("int & str");
    assert_eq!(scanner.scan(), Ok(SyntaxKind::Identifier));
    assert_eq!(
        scanner.scan(),
        Err(ParseError::UnexpectedCharacter { ch: '&', offset: 4 })
    );
}

#[test]
fn test_punctuation_to_text() {
    assert_eq!(punctuation_to_text(SyntaxKind::BarToken), Some("|"));
    assert_eq!(punctuation_to_text(SyntaxKind::DotDotDotToken), Some("..."));
    assert_eq!(punctuation_to_text(SyntaxKind::Identifier), None);
    assert!(token_is_literal(SyntaxKind::StringLiteral));
    assert!(!token_is_literal(SyntaxKind::Identifier));
}
