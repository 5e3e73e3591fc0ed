//! Subtype relation dispatch.
//!
//! Structural forms are resolved in a fixed precedence before any table
//! lookup:
//!
//! 1. `Union` subtype: every member must be a subtype.
//! 2. `Literal` subtype: every literal value must conform to the supertype.
//! 3. `Union` supertype: some member must be a supertype.
//! 4. `Literal` supertype with any other subtype: never holds.
//! 5. Both parameterized: the subtype's origin picks a rule from the table.
//! 6. One side plain: host subclass check on the origins.
//!
//! The order matters for unions on both sides. `Union[int, str] <: Union[int, str]`
//! splits the subtype first, so each member only needs one matching
//! supertype member.

use tracing::trace;

use crate::checker::{RelationChecker, Shape};
use crate::diagnostics::{RelationError, RelationKind, RelationResult};
use crate::subtype_rules::{literals, unions};
use crate::types::{Generic, Origin, TypeDesc, TypeId};

pub(crate) fn check_subtype(
    checker: &RelationChecker<'_>,
    sub: &TypeDesc,
    sup: &TypeDesc,
) -> RelationResult<bool> {
    let source = checker.decompose(sub)?;
    let target = checker.decompose(sup)?;
    trace!(?source, ?target, "check_subtype");

    match (source, target) {
        (Shape::Generic(members), _) if members.origin == Origin::Union => {
            unions::check_union_source(checker, members, sup)
        }
        (Shape::Generic(literal), _) if literal.origin == Origin::Literal => {
            literals::check_literal_source(checker, literal, sup)
        }
        (_, Shape::Generic(members)) if members.origin == Origin::Union => {
            unions::check_union_target(checker, sub, members)
        }
        (_, Shape::Generic(literal)) if literal.origin == Origin::Literal => {
            literals::check_literal_target(checker, literal)
        }
        (Shape::Generic(source), Shape::Generic(target)) => {
            check_generic_pair(checker, source, target)
        }
        (Shape::Generic(source), Shape::Plain(target)) => {
            let source = checker.origin_type(source)?;
            Ok(checker.host().is_subclass(source, target))
        }
        (Shape::Plain(source), Shape::Generic(target)) => {
            let target = checker.origin_type(target)?;
            Ok(checker.host().is_subclass(source, target))
        }
        (Shape::Plain(source), Shape::Plain(target)) => {
            Ok(checker.host().is_subclass(source, target))
        }
    }
}

fn check_generic_pair(
    checker: &RelationChecker<'_>,
    source: &Generic,
    target: &Generic,
) -> RelationResult<bool> {
    for generic in [source, target] {
        if is_tuple_subclass(checker, generic.origin) {
            return Err(RelationError::UnsupportedTupleSubtype {
                origin: checker.formatter().format_origin(generic.origin),
            });
        }
    }

    // A tuple is only ever a subtype of a tuple, whatever the host says.
    if target.origin == Origin::Tuple && source.origin != Origin::Tuple {
        return Ok(false);
    }

    let rules = checker.rules();
    let Some(rule) = rules.subtype_rule(source.origin) else {
        let origin = checker.formatter().format_origin(source.origin);
        return Err(if rules.has_instance_rule(source.origin) {
            RelationError::UnsupportedOrigin { origin }
        } else {
            RelationError::UnknownOrigin {
                origin,
                relation: RelationKind::Subtype,
            }
        });
    };
    trace!(origin = ?source.origin, "subtype rule");
    rule(checker, source, target)
}

/// A user origin strictly deriving from `tuple`.
fn is_tuple_subclass(checker: &RelationChecker<'_>, origin: Origin) -> bool {
    match origin {
        Origin::Extension(ty) => ty != TypeId::TUPLE && checker.host().is_subclass(ty, TypeId::TUPLE),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
