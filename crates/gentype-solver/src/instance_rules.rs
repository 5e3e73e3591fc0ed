//! Built-in instance rules: union, literal, tuple and the covariant containers.

use crate::checker::RelationChecker;
use crate::diagnostics::{MalformedReason, RelationResult};
use crate::registry::RuleRegistry;
use crate::types::{ContainerKind, Origin, TupleShape, TypeArg, TypeId};
use crate::value::Value;

pub(crate) fn register_builtins(registry: &RuleRegistry) {
    registry.register_instance_rule(Origin::Union, union_instance);
    registry.register_instance_rule(Origin::Literal, literal_instance);
    registry.register_instance_rule(Origin::Tuple, tuple_instance);
    for kind in ContainerKind::ALL {
        registry.register_instance_rule(Origin::Container(kind), move |checker, value, args| {
            container_instance(checker, kind, value, args)
        });
    }
}

/// Conforms to any member; members are tried in order and the first match wins.
fn union_instance(
    checker: &RelationChecker<'_>,
    value: &Value,
    members: &[TypeArg],
) -> RelationResult<bool> {
    for member in members {
        if checker.conforms_arg(value, member)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Equal to one of the listed values under host equality: `True` matches
/// `Literal[1]` and key order is irrelevant for dicts.
fn literal_instance(
    checker: &RelationChecker<'_>,
    value: &Value,
    literals: &[TypeArg],
) -> RelationResult<bool> {
    let mut matched = false;
    for literal in literals {
        match literal {
            TypeArg::Value(candidate) => matched |= candidate.value_eq(value),
            TypeArg::Type(_) | TypeArg::Ellipsis => {
                return Err(checker.malformed(
                    Origin::Literal,
                    literals,
                    MalformedReason::LiteralExpected,
                ));
            }
        }
    }
    Ok(matched)
}

fn tuple_instance(
    checker: &RelationChecker<'_>,
    value: &Value,
    args: &[TypeArg],
) -> RelationResult<bool> {
    if !checker.host().is_instance(value, TypeId::TUPLE) {
        return Ok(false);
    }
    let Some(items) = value.items() else {
        return Ok(false);
    };
    let shape = checker.tuple_shape(args)?;

    match shape {
        TupleShape::Variadic(element) => {
            for item in items {
                if !checker.conforms_arg(item, element)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        TupleShape::Fixed(elements) => {
            if items.len() != elements.len() {
                return Ok(false);
            }
            for (item, element) in items.iter().zip(elements) {
                if !checker.conforms_arg(item, element)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

fn container_instance(
    checker: &RelationChecker<'_>,
    kind: ContainerKind,
    value: &Value,
    args: &[TypeArg],
) -> RelationResult<bool> {
    let element = checker.sole_argument(Origin::Container(kind), args)?;
    if !checker.host().is_instance(value, kind.type_id()) {
        return Ok(false);
    }
    let Some(elements) = value.elements() else {
        return Ok(false);
    };
    for item in elements {
        if !checker.conforms_arg(&item, element)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
#[path = "../tests/instance_tests.rs"]
mod tests;
