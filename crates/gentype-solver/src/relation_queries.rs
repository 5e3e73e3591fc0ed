//! Relation query entrypoints.
//!
//! The free functions run against the process-wide hierarchy and registry.
//! [`query_relation`] is the configurable form: callers pick the host, the
//! rule tables and the recursion limits.

use crate::checker::RelationChecker;
use crate::diagnostics::{RelationKind, RelationResult};
use crate::hierarchy::{ClassHierarchy, TypeHost};
use crate::recursion::RecursionProfile;
use crate::registry::{InstanceRule, RuleRegistry, SubtypeRule};
use crate::types::{Generic, Origin, TypeArg, TypeDesc};
use crate::value::Value;

/// Does `value` conform to `ty`?
pub fn conforms(value: &Value, ty: &TypeDesc) -> RelationResult<bool> {
    RelationChecker::global().conforms(value, ty)
}

/// Is `sub` a subtype of `sup`?
pub fn is_subtype(sub: &TypeDesc, sup: &TypeDesc) -> RelationResult<bool> {
    RelationChecker::global().is_subtype(sub, sup)
}

/// Register an instance rule in the process-wide registry.
///
/// Replaces and returns any rule already registered for `origin`.
pub fn register_instance_rule<F>(origin: Origin, rule: F) -> Option<InstanceRule>
where
    F: Fn(&RelationChecker<'_>, &Value, &[TypeArg]) -> RelationResult<bool> + Send + Sync + 'static,
{
    RuleRegistry::global().register_instance_rule(origin, rule)
}

/// Register a subtype rule in the process-wide registry.
///
/// Replaces and returns any rule already registered for `origin`.
pub fn register_subtype_rule<F>(origin: Origin, rule: F) -> Option<SubtypeRule>
where
    F: Fn(&RelationChecker<'_>, &Generic, &Generic) -> RelationResult<bool> + Send + Sync + 'static,
{
    RuleRegistry::global().register_subtype_rule(origin, rule)
}

/// One relation question.
#[derive(Debug, Clone, Copy)]
pub enum RelationQuery<'q> {
    Instance { value: &'q Value, ty: &'q TypeDesc },
    Subtype { sub: &'q TypeDesc, sup: &'q TypeDesc },
}

impl RelationQuery<'_> {
    pub fn kind(&self) -> RelationKind {
        match self {
            Self::Instance { .. } => RelationKind::Instance,
            Self::Subtype { .. } => RelationKind::Subtype,
        }
    }
}

/// Policy knobs for relation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationPolicy {
    pub profile: RecursionProfile,
}

impl RelationPolicy {
    pub fn with_profile(mut self, profile: RecursionProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// Host and rule tables a query runs against.
#[derive(Clone, Copy)]
pub struct RelationContext<'a> {
    pub host: &'a dyn TypeHost,
    pub rules: &'a RuleRegistry,
}

impl<'a> RelationContext<'a> {
    pub fn new(host: &'a dyn TypeHost, rules: &'a RuleRegistry) -> Self {
        Self { host, rules }
    }

    pub fn global() -> RelationContext<'static> {
        RelationContext::new(ClassHierarchy::global(), RuleRegistry::global())
    }
}

/// Answer `query` with a fresh checker.
pub fn query_relation(
    query: RelationQuery<'_>,
    policy: RelationPolicy,
    context: RelationContext<'_>,
) -> RelationResult<bool> {
    let checker = RelationChecker::new(context.host, context.rules).with_profile(policy.profile);
    match query {
        RelationQuery::Instance { value, ty } => checker.conforms(value, ty),
        RelationQuery::Subtype { sub, sup } => checker.is_subtype(sub, sup),
    }
}
