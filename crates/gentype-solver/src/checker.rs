//! Per-call relation context.
//!
//! A [`RelationChecker`] bundles the host, the rule tables and a recursion
//! guard. Rules receive the checker so they can recurse into either relation
//! through the same guard; the free functions in
//! [`relation_queries`](crate::relation_queries) build a fresh one per call.

use std::cell::RefCell;

use tracing::trace;

use crate::diagnostics::{MalformedReason, RelationError, RelationKind, RelationResult};
use crate::format::TypeFormatter;
use crate::hierarchy::{ClassHierarchy, TypeHost};
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::registry::RuleRegistry;
use crate::subtype;
use crate::types::{Generic, Origin, TupleShape, TypeArg, TypeDesc, TypeId};
use crate::value::Value;

/// Identity of one in-progress check: relation plus the addresses of both operands.
type GuardKey = (RelationKind, usize, usize);

/// A descriptor with zero-argument generics already collapsed.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Shape<'d> {
    Plain(TypeId),
    Generic(&'d Generic),
}

pub struct RelationChecker<'a> {
    host: &'a dyn TypeHost,
    rules: &'a RuleRegistry,
    guard: RefCell<RecursionGuard<GuardKey>>,
}

impl<'a> RelationChecker<'a> {
    pub fn new(host: &'a dyn TypeHost, rules: &'a RuleRegistry) -> Self {
        Self {
            host,
            rules,
            guard: RefCell::new(RecursionGuard::with_profile(RecursionProfile::default())),
        }
    }

    pub fn with_profile(mut self, profile: RecursionProfile) -> Self {
        self.guard = RefCell::new(RecursionGuard::with_profile(profile));
        self
    }

    /// Checker over the process-wide hierarchy and rule registry.
    pub fn global() -> RelationChecker<'static> {
        RelationChecker::new(ClassHierarchy::global(), RuleRegistry::global())
    }

    pub fn host(&self) -> &'a dyn TypeHost {
        self.host
    }

    pub fn rules(&self) -> &'a RuleRegistry {
        self.rules
    }

    pub fn formatter(&self) -> TypeFormatter<'a> {
        TypeFormatter::new(self.host)
    }

    // =========================================================================
    // Relations
    // =========================================================================

    /// Does `value` conform to `ty`?
    pub fn conforms(&self, value: &Value, ty: &TypeDesc) -> RelationResult<bool> {
        self.guarded(
            (RelationKind::Instance, address(value), address(ty)),
            || self.formatter().format(ty),
            || self.check_instance(value, ty),
        )
    }

    /// [`conforms`](Self::conforms) for a descriptor argument.
    pub fn conforms_arg(&self, value: &Value, arg: &TypeArg) -> RelationResult<bool> {
        let ty = self.expect_type(arg)?;
        self.conforms(value, ty)
    }

    /// Is `sub` a subtype of `sup`?
    pub fn is_subtype(&self, sub: &TypeDesc, sup: &TypeDesc) -> RelationResult<bool> {
        self.guarded(
            (RelationKind::Subtype, address(sub), address(sup)),
            || {
                let formatter = self.formatter();
                format!("{} <: {}", formatter.format(sub), formatter.format(sup))
            },
            || subtype::check_subtype(self, sub, sup),
        )
    }

    /// [`is_subtype`](Self::is_subtype) for two descriptor arguments.
    pub fn is_subtype_arg(&self, sub: &TypeArg, sup: &TypeArg) -> RelationResult<bool> {
        let sub = self.expect_type(sub)?;
        let sup = self.expect_type(sup)?;
        self.is_subtype(sub, sup)
    }

    fn check_instance(&self, value: &Value, ty: &TypeDesc) -> RelationResult<bool> {
        match self.decompose(ty)? {
            Shape::Plain(plain) => Ok(self.host.is_instance(value, plain)),
            Shape::Generic(generic) => {
                let Some(rule) = self.rules.instance_rule(generic.origin) else {
                    return Err(RelationError::UnknownOrigin {
                        origin: self.formatter().format_origin(generic.origin),
                        relation: RelationKind::Instance,
                    });
                };
                trace!(origin = ?generic.origin, "instance rule");
                rule(self, value, &generic.args)
            }
        }
    }

    fn guarded(
        &self,
        key: GuardKey,
        describe: impl FnOnce() -> String,
        check: impl FnOnce() -> RelationResult<bool>,
    ) -> RelationResult<bool> {
        let entered = self.guard.borrow_mut().enter(key);
        match entered {
            RecursionResult::Entered => {
                let result = check();
                self.guard.borrow_mut().leave(key);
                result
            }
            RecursionResult::Cycle => Err(RelationError::Cycle {
                descriptor: describe(),
            }),
            RecursionResult::DepthExceeded => Err(RelationError::DepthExceeded {
                limit: self.guard.borrow().max_depth(),
            }),
            RecursionResult::IterationExceeded => Err(RelationError::IterationsExceeded {
                limit: self.guard.borrow().max_iterations(),
            }),
        }
    }

    // =========================================================================
    // Helpers for rules
    // =========================================================================

    /// The descriptor inside `arg`, or `InvalidDescriptor`.
    pub fn expect_type<'d>(&self, arg: &'d TypeArg) -> RelationResult<&'d TypeDesc> {
        arg.as_type().ok_or_else(|| RelationError::InvalidDescriptor {
            found: self.formatter().format_arg(arg),
        })
    }

    /// Require exactly `expected` arguments.
    pub fn expect_arity(
        &self,
        origin: Origin,
        args: &[TypeArg],
        expected: usize,
    ) -> RelationResult<()> {
        if args.len() == expected {
            return Ok(());
        }
        Err(self.malformed(
            origin,
            args,
            MalformedReason::ArgumentCount {
                expected,
                found: args.len(),
            },
        ))
    }

    /// The single argument of a one-parameter generic.
    pub fn sole_argument<'d>(
        &self,
        origin: Origin,
        args: &'d [TypeArg],
    ) -> RelationResult<&'d TypeArg> {
        self.expect_arity(origin, args, 1)?;
        Ok(&args[0])
    }

    /// Classify tuple arguments, rejecting a misplaced `...`.
    pub fn tuple_shape<'d>(&self, args: &'d [TypeArg]) -> RelationResult<TupleShape<'d>> {
        TupleShape::classify(args).ok_or_else(|| {
            self.malformed(Origin::Tuple, args, MalformedReason::VariadicTupleShape)
        })
    }

    /// Plain type standing for a generic's origin in host checks.
    pub fn origin_type(&self, generic: &Generic) -> RelationResult<TypeId> {
        generic.origin.plain_type().ok_or_else(|| {
            self.malformed(generic.origin, &generic.args, MalformedReason::BareSpecialForm)
        })
    }

    pub fn malformed(&self, origin: Origin, args: &[TypeArg], reason: MalformedReason) -> RelationError {
        RelationError::MalformedDescriptor {
            descriptor: self.formatter().format_parts(origin, args),
            reason,
        }
    }

    /// Collapse `origin[]` to the origin's plain type.
    ///
    /// A special form has no plain type, so a bare `Union`/`Literal` is malformed.
    pub(crate) fn decompose<'d>(&self, ty: &'d TypeDesc) -> RelationResult<Shape<'d>> {
        match ty {
            TypeDesc::Plain(plain) => Ok(Shape::Plain(*plain)),
            TypeDesc::Generic(generic) if generic.args.is_empty() => {
                self.origin_type(generic).map(Shape::Plain)
            }
            TypeDesc::Generic(generic) => Ok(Shape::Generic(generic)),
        }
    }
}

fn address<T>(item: &T) -> usize {
    item as *const T as usize
}
