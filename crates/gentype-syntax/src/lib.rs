//! Text syntax for descriptors and values.
//!
//! This crate provides the two front-end phases:
//! - `Scanner` - tokenizer over subscript notation
//! - `ParserState` - recursive-descent parser producing solver types
//!
//! Descriptors use the familiar typing spelling (`list[int]`,
//! `Union[int, str]`, `int | None`, `tuple[int, ...]`, `Literal['a', 1]`);
//! values use literal display syntax (`[1, 2]`, `(1, 'a')`, `{'k': None}`,
//! `Point(x=1)`).

mod error;
pub mod parser;
pub mod scanner;

pub use error::ParseError;
pub use parser::{ParserState, parse_type, parse_value};
pub use scanner::{Scanner, SyntaxKind};
