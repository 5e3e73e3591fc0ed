//! Type descriptor model.
//!
//! A descriptor is either a plain type, checked by the host, or a
//! parameterized generic: an origin plus an ordered argument list.
//!
//! - **Plain**: `int`, `list`, a user class
//! - **Generic**: `list[int]`, `Union[int, str]`, `tuple[int, ...]`, `Literal["a"]`
//!
//! Descriptors are plain trees. The engine never mutates or caches them;
//! callers build them once and pass them whole on every relation call.

use crate::value::Value;

// =============================================================================
// TypeId - plain type handle
// =============================================================================

/// Opaque handle for a plain (unparameterized) type.
///
/// The meaning of an id is owned by a [`TypeHost`](crate::TypeHost). The
/// well-known ids below are reserved in every host; user classes are handed
/// out from [`TypeId::FIRST_USER`] upwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const OBJECT: Self = Self(0);
    pub const NONE: Self = Self(1);
    pub const BOOL: Self = Self(2);
    pub const INT: Self = Self(3);
    pub const FLOAT: Self = Self(4);
    pub const STR: Self = Self(5);
    pub const TUPLE: Self = Self(6);
    pub const LIST: Self = Self(7);
    pub const DICT: Self = Self(8);
    pub const ITERABLE: Self = Self(9);
    pub const COLLECTION: Self = Self(10);
    pub const SEQUENCE: Self = Self(11);
    pub const MAPPING: Self = Self(12);

    /// First id handed out to user-declared classes.
    pub const FIRST_USER: u32 = 16;

    /// Returns `true` for ids reserved by the built-in lattice.
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// Built-in plain types: id, name, direct bases.
///
/// Bases always precede their subclasses in this table.
pub(crate) const BUILTIN_TYPES: &[(TypeId, &str, &[TypeId])] = &[
    (TypeId::OBJECT, "object", &[]),
    (TypeId::NONE, "NoneType", &[TypeId::OBJECT]),
    (TypeId::INT, "int", &[TypeId::OBJECT]),
    (TypeId::BOOL, "bool", &[TypeId::INT]),
    (TypeId::FLOAT, "float", &[TypeId::OBJECT]),
    (TypeId::ITERABLE, "Iterable", &[TypeId::OBJECT]),
    (TypeId::COLLECTION, "Collection", &[TypeId::ITERABLE]),
    (TypeId::SEQUENCE, "Sequence", &[TypeId::COLLECTION]),
    (TypeId::MAPPING, "Mapping", &[TypeId::COLLECTION]),
    (TypeId::STR, "str", &[TypeId::SEQUENCE]),
    (TypeId::TUPLE, "tuple", &[TypeId::SEQUENCE]),
    (TypeId::LIST, "list", &[TypeId::SEQUENCE]),
    (TypeId::DICT, "dict", &[TypeId::MAPPING]),
];

// =============================================================================
// Origin - the unparameterized base of a generic
// =============================================================================

/// Single-argument covariant containers with a built-in rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    List,
    Sequence,
    Collection,
    Iterable,
}

impl ContainerKind {
    pub const ALL: [Self; 4] = [Self::List, Self::Sequence, Self::Collection, Self::Iterable];

    /// The container's own unparameterized type.
    pub const fn type_id(self) -> TypeId {
        match self {
            Self::List => TypeId::LIST,
            Self::Sequence => TypeId::SEQUENCE,
            Self::Collection => TypeId::COLLECTION,
            Self::Iterable => TypeId::ITERABLE,
        }
    }
}

/// Origin tag of a parameterized descriptor.
///
/// The closed structural forms get their own variants; every other origin is
/// an [`Extension`](Origin::Extension) keyed by its plain type, which is how
/// callers register rules for their own generic classes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    Union,
    Literal,
    Tuple,
    Container(ContainerKind),
    Extension(TypeId),
}

impl Origin {
    /// Canonical origin for a plain type.
    ///
    /// `Origin::of(TypeId::LIST)` is `Container(List)`, never `Extension(LIST)`,
    /// so both spellings dispatch to the same rule.
    pub const fn of(ty: TypeId) -> Self {
        match ty {
            TypeId::TUPLE => Self::Tuple,
            TypeId::LIST => Self::Container(ContainerKind::List),
            TypeId::SEQUENCE => Self::Container(ContainerKind::Sequence),
            TypeId::COLLECTION => Self::Container(ContainerKind::Collection),
            TypeId::ITERABLE => Self::Container(ContainerKind::Iterable),
            other => Self::Extension(other),
        }
    }

    /// The plain type a bare use of this origin stands for.
    ///
    /// Special forms (`Union`, `Literal`) have none.
    pub const fn plain_type(self) -> Option<TypeId> {
        match self {
            Self::Union | Self::Literal => None,
            Self::Tuple => Some(TypeId::TUPLE),
            Self::Container(kind) => Some(kind.type_id()),
            Self::Extension(ty) => Some(ty),
        }
    }

    pub const fn is_special_form(self) -> bool {
        matches!(self, Self::Union | Self::Literal)
    }
}

// =============================================================================
// Descriptors
// =============================================================================

/// One argument of a parameterized descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeArg {
    /// A nested descriptor.
    Type(TypeDesc),
    /// A literal value; only meaningful under `Literal`.
    Value(Value),
    /// The variadic-tuple repeat sentinel (`...`).
    Ellipsis,
}

impl TypeArg {
    pub fn as_type(&self) -> Option<&TypeDesc> {
        match self {
            Self::Type(ty) => Some(ty),
            Self::Value(_) | Self::Ellipsis => None,
        }
    }
}

impl From<TypeDesc> for TypeArg {
    fn from(ty: TypeDesc) -> Self {
        Self::Type(ty)
    }
}

/// Origin plus ordered argument list.
#[derive(Clone, Debug, PartialEq)]
pub struct Generic {
    pub origin: Origin,
    pub args: Vec<TypeArg>,
}

impl Generic {
    pub fn new(origin: Origin, args: Vec<TypeArg>) -> Self {
        Self { origin, args }
    }
}

/// A type descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDesc {
    Plain(TypeId),
    Generic(Generic),
}

impl TypeDesc {
    pub const OBJECT: Self = Self::Plain(TypeId::OBJECT);
    pub const NONE: Self = Self::Plain(TypeId::NONE);
    pub const BOOL: Self = Self::Plain(TypeId::BOOL);
    pub const INT: Self = Self::Plain(TypeId::INT);
    pub const FLOAT: Self = Self::Plain(TypeId::FLOAT);
    pub const STR: Self = Self::Plain(TypeId::STR);

    pub const fn plain(ty: TypeId) -> Self {
        Self::Plain(ty)
    }

    /// Raw constructor; argument shape is validated by the relations, not here.
    pub fn parameterized(origin: Origin, args: impl IntoIterator<Item = TypeArg>) -> Self {
        Self::Generic(Generic::new(origin, args.into_iter().collect()))
    }

    /// `ty[args...]` with the origin canonicalised through [`Origin::of`].
    pub fn generic(ty: TypeId, args: impl IntoIterator<Item = TypeDesc>) -> Self {
        Self::parameterized(Origin::of(ty), args.into_iter().map(TypeArg::Type))
    }

    pub fn union(members: impl IntoIterator<Item = TypeDesc>) -> Self {
        Self::parameterized(Origin::Union, members.into_iter().map(TypeArg::Type))
    }

    /// `Union[inner, NoneType]`.
    pub fn optional(inner: TypeDesc) -> Self {
        Self::union([inner, Self::NONE])
    }

    pub fn literal(values: impl IntoIterator<Item = Value>) -> Self {
        Self::parameterized(Origin::Literal, values.into_iter().map(TypeArg::Value))
    }

    /// Fixed-arity tuple.
    pub fn tuple(elements: impl IntoIterator<Item = TypeDesc>) -> Self {
        Self::parameterized(Origin::Tuple, elements.into_iter().map(TypeArg::Type))
    }

    /// `tuple[element, ...]`.
    pub fn variadic_tuple(element: TypeDesc) -> Self {
        Self::parameterized(Origin::Tuple, [TypeArg::Type(element), TypeArg::Ellipsis])
    }

    pub fn container(kind: ContainerKind, element: TypeDesc) -> Self {
        Self::parameterized(Origin::Container(kind), [TypeArg::Type(element)])
    }

    pub fn list(element: TypeDesc) -> Self {
        Self::container(ContainerKind::List, element)
    }

    pub fn sequence(element: TypeDesc) -> Self {
        Self::container(ContainerKind::Sequence, element)
    }

    pub fn collection(element: TypeDesc) -> Self {
        Self::container(ContainerKind::Collection, element)
    }

    pub fn iterable(element: TypeDesc) -> Self {
        Self::container(ContainerKind::Iterable, element)
    }

    pub fn dict(key: TypeDesc, value: TypeDesc) -> Self {
        Self::generic(TypeId::DICT, [key, value])
    }

    pub fn mapping(key: TypeDesc, value: TypeDesc) -> Self {
        Self::generic(TypeId::MAPPING, [key, value])
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            Self::Plain(_) => None,
            Self::Generic(generic) => Some(generic.origin),
        }
    }

    pub fn args(&self) -> &[TypeArg] {
        match self {
            Self::Plain(_) => &[],
            Self::Generic(generic) => &generic.args,
        }
    }
}

impl From<TypeId> for TypeDesc {
    fn from(ty: TypeId) -> Self {
        Self::Plain(ty)
    }
}

// =============================================================================
// Tuple shape
// =============================================================================

/// Arity classification of a tuple argument list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TupleShape<'a> {
    /// `tuple[A, B, C]`: exact length, positional element types.
    Fixed(&'a [TypeArg]),
    /// `tuple[A, ...]`: any length, every element of type `A`.
    Variadic(&'a TypeArg),
}

impl<'a> TupleShape<'a> {
    /// Classify `args`, or `None` when the repeat sentinel is misplaced.
    ///
    /// The sentinel is only valid as the second of exactly two arguments.
    pub fn classify(args: &'a [TypeArg]) -> Option<Self> {
        let sentinels = args
            .iter()
            .filter(|arg| matches!(arg, TypeArg::Ellipsis))
            .count();
        match (sentinels, args) {
            (0, _) => Some(Self::Fixed(args)),
            (1, [element, TypeArg::Ellipsis]) => Some(Self::Variadic(element)),
            _ => None,
        }
    }

    pub fn is_variadic(self) -> bool {
        matches!(self, Self::Variadic(_))
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
