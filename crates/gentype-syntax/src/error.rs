use crate::scanner::SyntaxKind;

/// A syntax error, located by byte offset into the source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid number `{text}` at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("expected {expected}, found {found:?} at offset {offset}")]
    Expected {
        expected: &'static str,
        found: SyntaxKind,
        offset: usize,
    },

    #[error("unknown name `{name}` at offset {offset}")]
    UnknownName { name: String, offset: usize },

    #[error("`{name}` takes {expected} argument(s), got {found} at offset {offset}")]
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
        offset: usize,
    },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { offset, .. }
            | Self::UnterminatedString { offset }
            | Self::InvalidNumber { offset, .. }
            | Self::Expected { offset, .. }
            | Self::UnknownName { offset, .. }
            | Self::ArgumentCount { offset, .. } => *offset,
        }
    }
}
