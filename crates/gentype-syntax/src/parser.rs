//! Recursive-descent parser for descriptors and values.
//!
//! ```text
//! type     := atom ('|' atom)*
//! atom     := NAME ('[' (arg (',' arg)* ','?)? ']')?
//! arg      := '...' | type
//! value    := 'None' | 'True' | 'False' | '-'? NUMBER | STRING
//!           | '[' values ']' | '(' values ')' | '{' entries '}'
//!           | NAME '(' ('[' values ']')? (',' NAME '=' value)* ')'
//! ```
//!
//! Names resolve through a [`ClassHierarchy`]. The `typing.`,
//! `collections.abc.` and `builtins.` prefixes are dropped, and the
//! capitalised aliases (`List`, `Tuple`, `Dict`) map to the builtins.
//! `Union`, `Optional` and `Literal` are handled here; argument shape is
//! left to the relations to validate, so `tuple[..., int]` parses fine and
//! fails later as a malformed descriptor.

use gentype_solver::{ClassHierarchy, Object, Origin, TypeArg, TypeDesc, TypeId, Value};
use tracing::trace;

use crate::error::ParseError;
use crate::scanner::{Scanner, SyntaxKind};

const STRIPPED_PREFIXES: &[&str] = &["typing.", "collections.abc.", "builtins."];

/// Special forms that are not classes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SpecialForm {
    Union,
    Optional,
    Literal,
}

fn unqualified(name: &str) -> &str {
    STRIPPED_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name)
}

fn special_form(name: &str) -> Option<SpecialForm> {
    match unqualified(name) {
        "Union" => Some(SpecialForm::Union),
        "Optional" => Some(SpecialForm::Optional),
        "Literal" => Some(SpecialForm::Literal),
        _ => None,
    }
}

fn class_name(name: &str) -> &str {
    match unqualified(name) {
        "List" => "list",
        "Tuple" => "tuple",
        "Dict" => "dict",
        "None" => "NoneType",
        other => other,
    }
}

/// Parse a complete descriptor.
pub fn parse_type(source: &str, hierarchy: &ClassHierarchy) -> Result<TypeDesc, ParseError> {
    let mut parser = ParserState::new(source, hierarchy)?;
    let ty = parser.parse_type()?;
    parser.parse_expected(SyntaxKind::EndOfFileToken, "end of input")?;
    trace!(source, ?ty, "parse_type");
    Ok(ty)
}

/// Parse a complete value.
pub fn parse_value(source: &str, hierarchy: &ClassHierarchy) -> Result<Value, ParseError> {
    let mut parser = ParserState::new(source, hierarchy)?;
    let value = parser.parse_value()?;
    parser.parse_expected(SyntaxKind::EndOfFileToken, "end of input")?;
    trace!(source, ?value, "parse_value");
    Ok(value)
}

pub struct ParserState<'s, 'h> {
    scanner: Scanner<'s>,
    current_token: SyntaxKind,
    hierarchy: &'h ClassHierarchy,
}

impl<'s, 'h> ParserState<'s, 'h> {
    pub fn new(source: &'s str, hierarchy: &'h ClassHierarchy) -> Result<Self, ParseError> {
        let mut scanner = Scanner::new(source);
        let current_token = scanner.scan()?;
        Ok(Self {
            scanner,
            current_token,
            hierarchy,
        })
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    #[inline]
    pub fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    fn next_token(&mut self) -> Result<(), ParseError> {
        self.current_token = self.scanner.scan()?;
        Ok(())
    }

    /// Consume `kind` if it is the current token.
    fn parse_optional(&mut self, kind: SyntaxKind) -> Result<bool, ParseError> {
        if !self.is_token(kind) {
            return Ok(false);
        }
        self.next_token()?;
        Ok(true)
    }

    pub fn parse_expected(
        &mut self,
        kind: SyntaxKind,
        expected: &'static str,
    ) -> Result<(), ParseError> {
        if self.parse_optional(kind)? {
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    fn expected(&self, expected: &'static str) -> ParseError {
        ParseError::Expected {
            expected,
            found: self.current_token,
            offset: self.scanner.token_pos(),
        }
    }

    /// Comma-separated elements up to and including `close`; a trailing comma is allowed.
    fn parse_delimited<T>(
        &mut self,
        close: SyntaxKind,
        expected: &'static str,
        mut element: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        while !self.is_token(close) {
            items.push(element(self)?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.parse_expected(close, expected)?;
        Ok(items)
    }

    /// Take the current identifier, returning its text and offset.
    fn parse_identifier(&mut self, expected: &'static str) -> Result<(String, usize), ParseError> {
        if !self.is_token(SyntaxKind::Identifier) {
            return Err(self.expected(expected));
        }
        let name = self.scanner.token_value().to_owned();
        let offset = self.scanner.token_pos();
        self.next_token()?;
        Ok((name, offset))
    }

    fn resolve_class(&self, name: &str, offset: usize) -> Result<TypeId, ParseError> {
        self.hierarchy
            .lookup(class_name(name))
            .ok_or_else(|| ParseError::UnknownName {
                name: name.to_owned(),
                offset,
            })
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Parse a type, folding `A | B` into a union.
    pub fn parse_type(&mut self) -> Result<TypeDesc, ParseError> {
        let first = self.parse_type_atom()?;
        if !self.is_token(SyntaxKind::BarToken) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.parse_optional(SyntaxKind::BarToken)? {
            members.push(self.parse_type_atom()?);
        }
        Ok(TypeDesc::union(members))
    }

    fn parse_type_atom(&mut self) -> Result<TypeDesc, ParseError> {
        let (name, offset) = self.parse_identifier("a type")?;
        let special = special_form(&name);

        if !self.parse_optional(SyntaxKind::OpenBracketToken)? {
            return match special {
                Some(SpecialForm::Union) => Ok(TypeDesc::parameterized(Origin::Union, [])),
                Some(SpecialForm::Literal) => Ok(TypeDesc::parameterized(Origin::Literal, [])),
                Some(SpecialForm::Optional) => Err(ParseError::ArgumentCount {
                    name,
                    expected: 1,
                    found: 0,
                    offset,
                }),
                None => self.resolve_class(&name, offset).map(TypeDesc::Plain),
            };
        }

        match special {
            Some(SpecialForm::Literal) => {
                let values = self.parse_delimited(
                    SyntaxKind::CloseBracketToken,
                    "`]`",
                    Self::parse_value,
                )?;
                Ok(TypeDesc::literal(values))
            }
            Some(SpecialForm::Union) => {
                let members = self.parse_type_arguments()?;
                Ok(TypeDesc::parameterized(Origin::Union, members))
            }
            Some(SpecialForm::Optional) => {
                let mut args = self.parse_type_arguments()?;
                if args.len() != 1 {
                    return Err(ParseError::ArgumentCount {
                        name,
                        expected: 1,
                        found: args.len(),
                        offset,
                    });
                }
                args.push(TypeArg::Type(TypeDesc::NONE));
                Ok(TypeDesc::parameterized(Origin::Union, args))
            }
            None => {
                let origin = Origin::of(self.resolve_class(&name, offset)?);
                let args = self.parse_type_arguments()?;
                Ok(TypeDesc::parameterized(origin, args))
            }
        }
    }

    fn parse_type_arguments(&mut self) -> Result<Vec<TypeArg>, ParseError> {
        self.parse_delimited(SyntaxKind::CloseBracketToken, "`]`", |parser| {
            if parser.parse_optional(SyntaxKind::DotDotDotToken)? {
                Ok(TypeArg::Ellipsis)
            } else {
                parser.parse_type().map(TypeArg::Type)
            }
        })
    }

    // =========================================================================
    // Values
    // =========================================================================

    pub fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.current_token {
            SyntaxKind::Identifier => self.parse_named_value(),
            SyntaxKind::IntLiteral | SyntaxKind::FloatLiteral => self.parse_number(false),
            SyntaxKind::MinusToken => {
                self.next_token()?;
                self.parse_number(true)
            }
            SyntaxKind::StringLiteral => {
                let text = self.scanner.token_value().to_owned();
                self.next_token()?;
                Ok(Value::Str(text))
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token()?;
                let items =
                    self.parse_delimited(SyntaxKind::CloseBracketToken, "`]`", Self::parse_value)?;
                Ok(Value::List(items))
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized(),
            SyntaxKind::OpenBraceToken => {
                self.next_token()?;
                let entries =
                    self.parse_delimited(SyntaxKind::CloseBraceToken, "`}`", |parser| {
                        let key = parser.parse_value()?;
                        parser.parse_expected(SyntaxKind::ColonToken, "`:`")?;
                        Ok((key, parser.parse_value()?))
                    })?;
                Ok(Value::Dict(entries))
            }
            _ => Err(self.expected("a value")),
        }
    }

    fn parse_number(&mut self, negative: bool) -> Result<Value, ParseError> {
        let kind = self.current_token;
        if !matches!(kind, SyntaxKind::IntLiteral | SyntaxKind::FloatLiteral) {
            return Err(self.expected("a number"));
        }
        let offset = self.scanner.token_pos();
        let text = if negative {
            format!("-{}", self.scanner.token_value())
        } else {
            self.scanner.token_value().to_owned()
        };
        self.next_token()?;

        let value = if kind == SyntaxKind::IntLiteral {
            text.parse().map(Value::Int).ok()
        } else {
            text.parse().map(Value::Float).ok()
        };
        value.ok_or(ParseError::InvalidNumber { text, offset })
    }

    /// `(x)` is `x`; `()`, `(x,)` and `(x, y)` are tuples.
    fn parse_parenthesized(&mut self) -> Result<Value, ParseError> {
        self.next_token()?;
        let mut items = Vec::new();
        let mut trailing_comma = false;
        while !self.is_token(SyntaxKind::CloseParenToken) {
            items.push(self.parse_value()?);
            trailing_comma = self.parse_optional(SyntaxKind::CommaToken)?;
            if !trailing_comma {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken, "`)`")?;

        if items.len() == 1 && !trailing_comma {
            return Ok(items.remove(0));
        }
        Ok(Value::Tuple(items))
    }

    fn parse_named_value(&mut self) -> Result<Value, ParseError> {
        let (name, offset) = self.parse_identifier("a value")?;
        match name.as_str() {
            "None" => return Ok(Value::None),
            "True" => return Ok(Value::Bool(true)),
            "False" => return Ok(Value::Bool(false)),
            _ => {}
        }

        let class = self.resolve_class(&name, offset)?;
        self.parse_expected(SyntaxKind::OpenParenToken, "`(`")?;
        let mut object = Object::new(class);
        let mut first = true;
        while !self.is_token(SyntaxKind::CloseParenToken) {
            if first && self.parse_optional(SyntaxKind::OpenBracketToken)? {
                let items =
                    self.parse_delimited(SyntaxKind::CloseBracketToken, "`]`", Self::parse_value)?;
                object.items = Some(items);
            } else {
                let (field, _) = self.parse_identifier("a field name")?;
                self.parse_expected(SyntaxKind::EqualsToken, "`=`")?;
                let value = self.parse_value()?;
                object.fields.insert(field, value);
            }
            first = false;
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken, "`)`")?;
        Ok(Value::object(object))
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod tests;
