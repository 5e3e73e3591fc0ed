//! Tokenizer for descriptor and value syntax.

use crate::error::ParseError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Possibly dotted name: `int`, `typing.List`, `collections.abc.Sequence`.
    Identifier,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    OpenBracketToken,
    CloseBracketToken,
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    CommaToken,
    ColonToken,
    EqualsToken,
    BarToken,
    MinusToken,
    DotDotDotToken,
    EndOfFileToken,
}

pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    let text = match kind {
        SyntaxKind::OpenBracketToken => "[",
        SyntaxKind::CloseBracketToken => "]",
        SyntaxKind::OpenParenToken => "(",
        SyntaxKind::CloseParenToken => ")",
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::CommaToken => ",",
        SyntaxKind::ColonToken => ":",
        SyntaxKind::EqualsToken => "=",
        SyntaxKind::BarToken => "|",
        SyntaxKind::MinusToken => "-",
        SyntaxKind::DotDotDotToken => "...",
        _ => return None,
    };
    Some(text)
}

pub fn token_is_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IntLiteral | SyntaxKind::FloatLiteral | SyntaxKind::StringLiteral
    )
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Single-pass scanner. Call [`scan`](Scanner::scan) to advance; the token
/// text (unescaped, for strings) is available through
/// [`token_value`](Scanner::token_value) until the next call.
pub struct Scanner<'s> {
    source: &'s str,
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
}

impl<'s> Scanner<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            pos: 0,
            token_start: 0,
            token: SyntaxKind::EndOfFileToken,
            token_value: String::new(),
        }
    }

    pub fn scan(&mut self) -> Result<SyntaxKind, ParseError> {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
        self.token_start = self.pos;
        self.token_value.clear();

        let Some(ch) = self.peek() else {
            self.token = SyntaxKind::EndOfFileToken;
            return Ok(self.token);
        };
        let kind = match ch {
            '[' => self.punctuation(SyntaxKind::OpenBracketToken, 1),
            ']' => self.punctuation(SyntaxKind::CloseBracketToken, 1),
            '(' => self.punctuation(SyntaxKind::OpenParenToken, 1),
            ')' => self.punctuation(SyntaxKind::CloseParenToken, 1),
            '{' => self.punctuation(SyntaxKind::OpenBraceToken, 1),
            '}' => self.punctuation(SyntaxKind::CloseBraceToken, 1),
            ',' => self.punctuation(SyntaxKind::CommaToken, 1),
            ':' => self.punctuation(SyntaxKind::ColonToken, 1),
            '=' => self.punctuation(SyntaxKind::EqualsToken, 1),
            '|' => self.punctuation(SyntaxKind::BarToken, 1),
            '-' => self.punctuation(SyntaxKind::MinusToken, 1),
            '.' if self.rest().starts_with("...") => {
                self.punctuation(SyntaxKind::DotDotDotToken, 3)
            }
            '\'' | '"' => self.scan_string(ch)?,
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            other => {
                return Err(ParseError::UnexpectedCharacter {
                    ch: other,
                    offset: self.pos,
                });
            }
        };
        self.token = kind;
        Ok(kind)
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_pos(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    fn rest(&self) -> &'s str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn punctuation(&mut self, kind: SyntaxKind, len: usize) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        let rest = self.rest();
        self.pos += rest.find(|ch: char| !predicate(ch)).unwrap_or(rest.len());
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        loop {
            self.eat_while(is_identifier_part);
            // `a.b` continues the name; `a...` does not.
            let mut next = self.rest().chars();
            if next.next() == Some('.') && next.next().is_some_and(is_identifier_start) {
                self.pos += 1;
                continue;
            }
            break;
        }
        self.token_value
            .push_str(&self.source[self.token_start..self.pos]);
        SyntaxKind::Identifier
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let mut kind = SyntaxKind::IntLiteral;
        self.eat_while(|ch| ch.is_ascii_digit() || ch == '_');

        let mut next = self.rest().chars();
        if next.next() == Some('.') && next.next().is_some_and(|ch| ch.is_ascii_digit()) {
            self.pos += 1;
            self.eat_while(|ch| ch.is_ascii_digit() || ch == '_');
            kind = SyntaxKind::FloatLiteral;
        }

        let mut next = self.rest().chars();
        if matches!(next.next(), Some('e' | 'E')) {
            let mut lookahead = next.clone();
            let sign = matches!(lookahead.next(), Some('+' | '-'));
            let digits = if sign { lookahead } else { next };
            if digits.clone().next().is_some_and(|ch| ch.is_ascii_digit()) {
                self.pos += if sign { 2 } else { 1 };
                self.eat_while(|ch| ch.is_ascii_digit());
                kind = SyntaxKind::FloatLiteral;
            }
        }

        self.token_value.extend(
            self.source[self.token_start..self.pos]
                .chars()
                .filter(|&ch| ch != '_'),
        );
        kind
    }

    fn scan_string(&mut self, quote: char) -> Result<SyntaxKind, ParseError> {
        let unterminated = ParseError::UnterminatedString {
            offset: self.token_start,
        };
        self.pos += quote.len_utf8();
        loop {
            let Some(ch) = self.peek() else {
                return Err(unterminated);
            };
            self.pos += ch.len_utf8();
            match ch {
                _ if ch == quote => return Ok(SyntaxKind::StringLiteral),
                '\\' => {
                    let Some(escaped) = self.peek() else {
                        return Err(unterminated);
                    };
                    self.pos += escaped.len_utf8();
                    self.token_value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '0' => '\0',
                        other => other,
                    });
                }
                other => self.token_value.push(other),
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
