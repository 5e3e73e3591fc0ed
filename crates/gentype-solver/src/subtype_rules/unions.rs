//! Union subtype checking.

use crate::checker::RelationChecker;
use crate::diagnostics::RelationResult;
use crate::types::{Generic, TypeDesc};

/// Union source: all members must be subtypes of target.
///
/// ## Union Source Rule:
/// `(A | B | C) <: T` if `A <: T` AND `B <: T` AND `C <: T`
pub(crate) fn check_union_source(
    checker: &RelationChecker<'_>,
    members: &Generic,
    target: &TypeDesc,
) -> RelationResult<bool> {
    for member in &members.args {
        let member = checker.expect_type(member)?;
        if !checker.is_subtype(member, target)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Union target: source must be a subtype of at least one member.
///
/// ## Union Target Rule:
/// `S <: (A | B | C)` if `S <: A` OR `S <: B` OR `S <: C`
pub(crate) fn check_union_target(
    checker: &RelationChecker<'_>,
    source: &TypeDesc,
    members: &Generic,
) -> RelationResult<bool> {
    for member in &members.args {
        let member = checker.expect_type(member)?;
        if checker.is_subtype(source, member)? {
            return Ok(true);
        }
    }
    Ok(false)
}
