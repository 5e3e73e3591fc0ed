//! Subtype rules, one module per structural form.
//!
//! - [`unions`]: union on either side
//! - [`literals`]: literal on either side
//! - [`tuples`]: fixed and variadic tuples, and tuples flowing into containers
//! - [`containers`]: the covariant single-argument containers

pub(crate) mod containers;
pub(crate) mod literals;
pub(crate) mod tuples;
pub(crate) mod unions;

use crate::registry::RuleRegistry;
use crate::types::{ContainerKind, Origin};

/// Table rules. Unions and literals are resolved before any lookup, so
/// only tuple and container origins are registered here.
pub(crate) fn register_builtins(registry: &RuleRegistry) {
    registry.register_subtype_rule(Origin::Tuple, tuples::check_tuple_subtype);
    for kind in ContainerKind::ALL {
        registry.register_subtype_rule(Origin::Container(kind), containers::check_container_subtype);
    }
}
