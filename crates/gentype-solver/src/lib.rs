//! Instance and subtype relations over parameterized type descriptors.
//!
//! Host languages usually answer "is this value an `int`?" and "is `bool` a
//! subclass of `int`?" for plain types only. This crate lifts both questions
//! to parameterized descriptors such as `list[tuple[int, str]]`,
//! `Union[int, None]`, `Literal["a", "b"]` and `tuple[int, ...]`:
//!
//! - [`conforms`]: does a runtime [`Value`] inhabit a [`TypeDesc`]?
//! - [`is_subtype`]: does one descriptor conform to another?
//!
//! Plain checks are delegated to a [`TypeHost`]; [`ClassHierarchy`] is the
//! bundled host. Structural forms (union, literal, tuple, the covariant
//! containers) have built-in rules, and any other generic origin gets its
//! behaviour from a [`RuleRegistry`] entry.
//!
//! Both relations share one [`RelationChecker`] per call, so rules can
//! recurse into either relation under the same recursion guard.

mod checker;
pub mod diagnostics;
mod format;
pub mod hierarchy;
mod instance_rules;
mod mappings;
pub mod recursion;
mod registry;
pub mod relation_queries;
mod subtype;
mod subtype_rules;
pub mod types;
pub mod value;

pub use checker::RelationChecker;
pub use diagnostics::{MalformedReason, RelationError, RelationKind, RelationResult};
pub use format::TypeFormatter;
pub use hierarchy::{ClassHierarchy, ClassInfo, HierarchyError, TypeHost};
pub use recursion::RecursionProfile;
pub use registry::{InstanceRule, RuleRegistry, SubtypeRule};
pub use relation_queries::{
    RelationContext, RelationPolicy, RelationQuery, conforms, is_subtype, query_relation,
    register_instance_rule, register_subtype_rule,
};
pub use types::{ContainerKind, Generic, Origin, TupleShape, TypeArg, TypeDesc, TypeId};
pub use value::{Object, Value};

#[cfg(test)]
#[path = "../tests/property_tests.rs"]
mod property_tests;

#[cfg(test)]
#[path = "../tests/concurrency_tests.rs"]
mod concurrency_tests;
