//! Origin-keyed rule tables for both relations.
//!
//! Two independent tables map an [`Origin`] to a rule: one for the instance
//! relation, one for the subtype relation. A fresh registry from
//! [`RuleRegistry::with_builtins`] already holds the rules for the closed
//! origins (union, literal, tuple, the containers) and for `dict`/`Mapping`;
//! callers add rules for their own generic classes before running checks.
//!
//! ## Registration policy
//!
//! Registering an origin that already has a rule replaces it (last write
//! wins). The replaced rule is returned so a caller can detect, restore, or
//! reject the overwrite.
//!
//! ## Concurrency
//!
//! Tables are sharded maps, so registration and lookup are both `&self`.
//! Lookups clone the rule's `Arc` out of the table before invoking it, which
//! keeps no shard locked while a rule recurses back into the relations.
//! Registrations must finish before concurrent checks begin.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use rustc_hash::FxBuildHasher;
use tracing::debug;

use crate::checker::RelationChecker;
use crate::diagnostics::RelationResult;
use crate::types::{Generic, Origin, TypeArg};
use crate::value::Value;
use crate::{instance_rules, mappings, subtype_rules};

/// Instance-relation rule: `(checker, value, args) -> conforms?`.
pub type InstanceRule =
    Arc<dyn Fn(&RelationChecker<'_>, &Value, &[TypeArg]) -> RelationResult<bool> + Send + Sync>;

/// Subtype-relation rule, keyed by the subtype's origin: `(checker, sub, sup) -> subtype?`.
///
/// Only invoked when both sides are parameterized and neither is a union
/// or literal.
pub type SubtypeRule =
    Arc<dyn Fn(&RelationChecker<'_>, &Generic, &Generic) -> RelationResult<bool> + Send + Sync>;

static GLOBAL_RULES: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::with_builtins);

pub struct RuleRegistry {
    instance: DashMap<Origin, InstanceRule, FxBuildHasher>,
    subtype: DashMap<Origin, SubtypeRule, FxBuildHasher>,
}

impl RuleRegistry {
    /// A registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            instance: DashMap::with_hasher(FxBuildHasher),
            subtype: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// A registry seeded with the built-in rules.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        instance_rules::register_builtins(&registry);
        subtype_rules::register_builtins(&registry);
        mappings::register_builtins(&registry);
        registry
    }

    /// The process-wide registry used by the free relation functions.
    pub fn global() -> &'static Self {
        &GLOBAL_RULES
    }

    pub fn register_instance_rule<F>(&self, origin: Origin, rule: F) -> Option<InstanceRule>
    where
        F: Fn(&RelationChecker<'_>, &Value, &[TypeArg]) -> RelationResult<bool>
            + Send
            + Sync
            + 'static,
    {
        let rule: InstanceRule = Arc::new(rule);
        let previous = self.instance.insert(origin, rule);
        debug!(?origin, replaced = previous.is_some(), "register instance rule");
        previous
    }

    pub fn register_subtype_rule<F>(&self, origin: Origin, rule: F) -> Option<SubtypeRule>
    where
        F: Fn(&RelationChecker<'_>, &Generic, &Generic) -> RelationResult<bool>
            + Send
            + Sync
            + 'static,
    {
        let rule: SubtypeRule = Arc::new(rule);
        let previous = self.subtype.insert(origin, rule);
        debug!(?origin, replaced = previous.is_some(), "register subtype rule");
        previous
    }

    pub fn instance_rule(&self, origin: Origin) -> Option<InstanceRule> {
        self.instance.get(&origin).map(|entry| Arc::clone(entry.value()))
    }

    pub fn subtype_rule(&self, origin: Origin) -> Option<SubtypeRule> {
        self.subtype.get(&origin).map(|entry| Arc::clone(entry.value()))
    }

    pub fn has_instance_rule(&self, origin: Origin) -> bool {
        self.instance.contains_key(&origin)
    }

    pub fn has_subtype_rule(&self, origin: Origin) -> bool {
        self.subtype.contains_key(&origin)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
