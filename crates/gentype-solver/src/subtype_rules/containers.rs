//! Covariant container subtype checking.

use crate::checker::RelationChecker;
use crate::diagnostics::RelationResult;
use crate::types::Generic;

/// ## Container Rule:
/// `C1[A] <: C2[B]` if `C1 <: C2` (host) AND `A <: B`
///
/// Unrelated origins are simply not subtypes. Once the origins are related,
/// the target must carry exactly one argument.
pub(crate) fn check_container_subtype(
    checker: &RelationChecker<'_>,
    source: &Generic,
    target: &Generic,
) -> RelationResult<bool> {
    let source_element = checker.sole_argument(source.origin, &source.args)?;
    let source_type = checker.origin_type(source)?;
    let target_type = checker.origin_type(target)?;
    if !checker.host().is_subclass(source_type, target_type) {
        return Ok(false);
    }
    let target_element = checker.sole_argument(target.origin, &target.args)?;
    checker.is_subtype_arg(source_element, target_element)
}
