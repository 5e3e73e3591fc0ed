//! Literal subtype checking.
//!
//! A literal type is the set of its values, so a literal source reduces to
//! the instance relation. Nothing but a literal is ever a subtype of a
//! literal target.

use crate::checker::RelationChecker;
use crate::diagnostics::{MalformedReason, RelationResult};
use crate::types::{Generic, Origin, TypeArg, TypeDesc};
use crate::value::Value;

/// ## Literal Source Rule:
/// `Literal[v1, v2] <: T` if `v1: T` AND `v2: T`
pub(crate) fn check_literal_source(
    checker: &RelationChecker<'_>,
    literal: &Generic,
    target: &TypeDesc,
) -> RelationResult<bool> {
    for value in literal_values(checker, literal)? {
        if !checker.conforms(value, target)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A non-literal source is never a subtype of a literal target.
pub(crate) fn check_literal_target(
    checker: &RelationChecker<'_>,
    literal: &Generic,
) -> RelationResult<bool> {
    literal_values(checker, literal)?;
    Ok(false)
}

fn literal_values<'d>(
    checker: &RelationChecker<'_>,
    literal: &'d Generic,
) -> RelationResult<Vec<&'d Value>> {
    literal
        .args
        .iter()
        .map(|arg| match arg {
            TypeArg::Value(value) => Ok(value),
            TypeArg::Type(_) | TypeArg::Ellipsis => Err(checker.malformed(
                Origin::Literal,
                &literal.args,
                MalformedReason::LiteralExpected,
            )),
        })
        .collect()
}
