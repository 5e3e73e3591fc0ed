//! Tuple subtype checking.
//!
//! Four tuple-to-tuple cases, by variadicity of each side:
//!
//! | source            | target            | holds when                          |
//! |-------------------|-------------------|-------------------------------------|
//! | `tuple[A, ...]`   | `tuple[B, ...]`   | `A <: B`                            |
//! | `tuple[A, ...]`   | `tuple[B1..Bn]`   | never                               |
//! | `tuple[A1..An]`   | `tuple[B, ...]`   | every `Ai <: B`                     |
//! | `tuple[A1..An]`   | `tuple[B1..Bm]`   | `n == m` and every `Ai <: Bi`       |
//!
//! A tuple flowing into a single-argument container must have every element
//! type (or the repeated type) under the container's argument.

use crate::checker::RelationChecker;
use crate::diagnostics::RelationResult;
use crate::types::{Generic, Origin, TupleShape, TypeArg, TypeId};

pub(crate) fn check_tuple_subtype(
    checker: &RelationChecker<'_>,
    source: &Generic,
    target: &Generic,
) -> RelationResult<bool> {
    let source_shape = checker.tuple_shape(&source.args)?;
    if target.origin == Origin::Tuple {
        let target_shape = checker.tuple_shape(&target.args)?;
        return check_tuple_to_tuple(checker, source_shape, target_shape);
    }

    let target_type = checker.origin_type(target)?;
    if !checker.host().is_subclass(TypeId::TUPLE, target_type) {
        return Ok(false);
    }
    let target_element = checker.sole_argument(target.origin, &target.args)?;
    match source_shape {
        TupleShape::Variadic(element) => checker.is_subtype_arg(element, target_element),
        TupleShape::Fixed(elements) => all_subtypes(checker, elements, target_element),
    }
}

fn check_tuple_to_tuple(
    checker: &RelationChecker<'_>,
    source: TupleShape<'_>,
    target: TupleShape<'_>,
) -> RelationResult<bool> {
    match (source, target) {
        (TupleShape::Variadic(source), TupleShape::Variadic(target)) => {
            checker.is_subtype_arg(source, target)
        }
        // Unbounded length can never satisfy a fixed arity.
        (TupleShape::Variadic(_), TupleShape::Fixed(_)) => Ok(false),
        (TupleShape::Fixed(sources), TupleShape::Variadic(target)) => {
            all_subtypes(checker, sources, target)
        }
        (TupleShape::Fixed(sources), TupleShape::Fixed(targets)) => {
            if sources.len() != targets.len() {
                return Ok(false);
            }
            for (source, target) in sources.iter().zip(targets) {
                if !checker.is_subtype_arg(source, target)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

fn all_subtypes(
    checker: &RelationChecker<'_>,
    sources: &[TypeArg],
    target: &TypeArg,
) -> RelationResult<bool> {
    for source in sources {
        if !checker.is_subtype_arg(source, target)? {
            return Ok(false);
        }
    }
    Ok(true)
}
