//! Host capability: plain (unparameterized) instance and subclass checks.
//!
//! The relation engine never inspects plain types itself. Every plain check
//! goes through a [`TypeHost`], so an embedding runtime can supply its own
//! class model. [`ClassHierarchy`] is the host that ships with the crate: a
//! nominal inheritance graph seeded with the built-in lattice
//!
//! ```text
//! object ─┬─ NoneType
//!         ├─ int ── bool
//!         ├─ float
//!         └─ Iterable ── Collection ─┬─ Sequence ─┬─ str
//!                                    │            ├─ tuple
//!                                    │            └─ list
//!                                    └─ Mapping ──── dict
//! ```
//!
//! User classes are appended with [`ClassHierarchy::define_class`]. Bases
//! must already exist, so the graph is acyclic by construction.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::Lazy;
use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

use crate::types::{BUILTIN_TYPES, TypeId};
use crate::value::Value;

/// Plain instance/subclass primitives supplied by the runtime environment.
pub trait TypeHost: Send + Sync {
    /// Reflexive, transitive subclass check between plain types.
    fn is_subclass(&self, sub: TypeId, sup: TypeId) -> bool;

    /// Plain instance check; defaults to a subclass check on the value's own type.
    fn is_instance(&self, value: &Value, ty: TypeId) -> bool {
        self.is_subclass(value.type_id(), ty)
    }

    /// Display name of a plain type.
    fn type_name(&self, ty: TypeId) -> String;
}

/// Declaration of one class in the hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: Arc<str>,
    pub bases: SmallVec<[TypeId; 2]>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("class `{0}` is already declared")]
    DuplicateName(String),
    #[error("unknown base class {0:?}")]
    UnknownBase(TypeId),
}

static GLOBAL_HIERARCHY: Lazy<ClassHierarchy> = Lazy::new(ClassHierarchy::new);

/// Nominal class hierarchy implementing [`TypeHost`].
pub struct ClassHierarchy {
    classes: DashMap<TypeId, ClassInfo, FxBuildHasher>,
    names: DashMap<Arc<str>, TypeId, FxBuildHasher>,
    next_id: AtomicU32,
}

impl fmt::Debug for ClassHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassHierarchy")
            .field("classes", &self.classes.len())
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Default for ClassHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassHierarchy {
    /// A hierarchy holding only the built-in types.
    pub fn new() -> Self {
        let hierarchy = Self {
            classes: DashMap::with_hasher(FxBuildHasher),
            names: DashMap::with_hasher(FxBuildHasher),
            next_id: AtomicU32::new(TypeId::FIRST_USER),
        };
        for &(id, name, bases) in BUILTIN_TYPES {
            let name: Arc<str> = Arc::from(name);
            hierarchy.names.insert(name.clone(), id);
            hierarchy.classes.insert(
                id,
                ClassInfo {
                    name,
                    bases: bases.iter().copied().collect(),
                },
            );
        }
        hierarchy
    }

    /// The process-wide hierarchy used by the free relation functions.
    pub fn global() -> &'static Self {
        &GLOBAL_HIERARCHY
    }

    /// Declare a user class. An empty `bases` list means `object`.
    pub fn define_class(&self, name: &str, bases: &[TypeId]) -> Result<TypeId, HierarchyError> {
        if let Some(&missing) = bases.iter().find(|base| !self.classes.contains_key(base)) {
            return Err(HierarchyError::UnknownBase(missing));
        }
        let bases: SmallVec<[TypeId; 2]> = if bases.is_empty() {
            SmallVec::from_slice(&[TypeId::OBJECT])
        } else {
            SmallVec::from_slice(bases)
        };

        match self.names.entry(Arc::from(name)) {
            Entry::Occupied(_) => Err(HierarchyError::DuplicateName(name.to_owned())),
            Entry::Vacant(slot) => {
                let id = TypeId(self.next_id.fetch_add(1, Ordering::SeqCst));
                debug!(class = name, id = id.0, ?bases, "ClassHierarchy::define_class");
                self.classes.insert(
                    id,
                    ClassInfo {
                        name: slot.key().clone(),
                        bases,
                    },
                );
                slot.insert(id);
                Ok(id)
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).map(|entry| *entry)
    }

    pub fn class(&self, ty: TypeId) -> Option<ClassInfo> {
        self.classes.get(&ty).map(|entry| entry.clone())
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.classes.contains_key(&ty)
    }

    fn bases(&self, ty: TypeId) -> SmallVec<[TypeId; 2]> {
        self.classes
            .get(&ty)
            .map(|entry| entry.bases.clone())
            .unwrap_or_default()
    }
}

impl TypeHost for ClassHierarchy {
    fn is_subclass(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        if sup == TypeId::OBJECT {
            return self.contains(sub);
        }

        let mut visited = FxHashSet::default();
        let mut stack = vec![sub];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            for base in self.bases(current) {
                if base == sup {
                    return true;
                }
                stack.push(base);
            }
        }
        false
    }

    fn type_name(&self, ty: TypeId) -> String {
        match self.classes.get(&ty) {
            Some(entry) => entry.name.to_string(),
            None => format!("<unknown #{}>", ty.0),
        }
    }
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
