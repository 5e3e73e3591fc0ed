//! Rules for the two-argument mapping origins `dict[K, V]` and `Mapping[K, V]`.
//!
//! These are registered like any user origin (as [`Origin::Extension`]), so
//! they double as the reference for multi-argument extensions.

use crate::checker::RelationChecker;
use crate::diagnostics::{MalformedReason, RelationResult};
use crate::registry::RuleRegistry;
use crate::types::{Generic, Origin, TypeArg, TypeId};
use crate::value::Value;

pub(crate) fn register_builtins(registry: &RuleRegistry) {
    for mapping_type in [TypeId::DICT, TypeId::MAPPING] {
        registry.register_instance_rule(Origin::Extension(mapping_type), move |checker, value, args| {
            mapping_instance(checker, mapping_type, value, args)
        });
        registry.register_subtype_rule(Origin::Extension(mapping_type), mapping_subtype);
    }
}

/// Every key conforms to `K` and every value to `V`.
fn mapping_instance(
    checker: &RelationChecker<'_>,
    mapping_type: TypeId,
    value: &Value,
    args: &[TypeArg],
) -> RelationResult<bool> {
    checker.expect_arity(Origin::Extension(mapping_type), args, 2)?;
    let (key_type, item_type) = (&args[0], &args[1]);
    if !checker.host().is_instance(value, mapping_type) {
        return Ok(false);
    }
    let Some(entries) = value.entries() else {
        return Ok(false);
    };
    for (key, item) in entries {
        if !checker.conforms_arg(key, key_type)? || !checker.conforms_arg(item, item_type)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// ## Mapping Rule:
/// `M1[K1, V1] <: M2[K2, V2]` if `M1 <: M2` (host) AND `K1 <: K2` AND `V1 <: V2`
///
/// Iterating a mapping yields its keys, so against a one-argument target
/// only the key type counts: `dict[str, int] <: Iterable[str]`.
fn mapping_subtype(
    checker: &RelationChecker<'_>,
    source: &Generic,
    target: &Generic,
) -> RelationResult<bool> {
    checker.expect_arity(source.origin, &source.args, 2)?;
    let (source_key, source_item) = (&source.args[0], &source.args[1]);

    let source_type = checker.origin_type(source)?;
    let target_type = checker.origin_type(target)?;
    if !checker.host().is_subclass(source_type, target_type) {
        return Ok(false);
    }

    match target.args.as_slice() {
        [target_key] => checker.is_subtype_arg(source_key, target_key),
        [target_key, target_item] => Ok(checker.is_subtype_arg(source_key, target_key)?
            && checker.is_subtype_arg(source_item, target_item)?),
        other => Err(checker.malformed(
            target.origin,
            other,
            MalformedReason::ArgumentCount {
                expected: 2,
                found: other.len(),
            },
        )),
    }
}

#[cfg(test)]
#[path = "../tests/mapping_tests.rs"]
mod tests;
