//! Failure taxonomy of the relations.
//!
//! All failures are deterministic for a given input and registry state and
//! are never recovered internally: a relation either answers `true`/`false`
//! or returns one of these. Callers that want permissive behaviour can map
//! selected kinds to `false` themselves.

use std::fmt;

/// Which relation a failure or a rule table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Value-to-type conformance.
    Instance,
    /// Type-to-type conformance.
    Subtype,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance => f.write_str("instance"),
            Self::Subtype => f.write_str("subtype"),
        }
    }
}

/// Structural rule a malformed descriptor violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// `...` anywhere but the second of exactly two tuple arguments.
    VariadicTupleShape,
    /// The origin takes a fixed number of arguments.
    ArgumentCount { expected: usize, found: usize },
    /// `Union` or `Literal` used without arguments.
    BareSpecialForm,
    /// A `Literal` argument that is not a literal value.
    LiteralExpected,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VariadicTupleShape => f.write_str(
                "a variadic tuple takes exactly two arguments, the second being `...`",
            ),
            Self::ArgumentCount { expected, found } => {
                write!(f, "expected {expected} argument(s), got {found}")
            }
            Self::BareSpecialForm => f.write_str("special form used without arguments"),
            Self::LiteralExpected => f.write_str("`Literal` arguments must be literal values"),
        }
    }
}

/// Error raised by the instance and subtype relations.
///
/// Descriptors are carried pre-formatted so the error reads well without the
/// host that named their types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    /// Something that is neither a plain nor a parameterized descriptor was
    /// used where a descriptor was expected.
    #[error("expected a type descriptor, found `{found}`")]
    InvalidDescriptor { found: String },

    #[error("malformed descriptor `{descriptor}`: {reason}")]
    MalformedDescriptor {
        descriptor: String,
        reason: MalformedReason,
    },

    #[error("no {relation} rule registered for origin `{origin}`")]
    UnknownOrigin {
        origin: String,
        relation: RelationKind,
    },

    #[error("subclasses of tuple are not supported as generic origins: `{origin}`")]
    UnsupportedTupleSubtype { origin: String },

    /// The origin is known to the instance relation but has no subtype rule.
    #[error("the subtype relation is not supported for origin `{origin}`")]
    UnsupportedOrigin { origin: String },

    #[error("relation check exceeded the maximum depth of {limit}")]
    DepthExceeded { limit: u32 },

    #[error("relation check exceeded its budget of {limit} steps")]
    IterationsExceeded { limit: u32 },

    /// A rule re-entered a `(value, descriptor)` pair still being checked.
    #[error("relation check re-entered `{descriptor}` without making progress")]
    Cycle { descriptor: String },
}

pub type RelationResult<T> = Result<T, RelationError>;
