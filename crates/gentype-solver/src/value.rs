//! Runtime values checked by the instance relation.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::types::TypeId;

/// A dynamically typed runtime value.
///
/// `PartialEq` is structural. `Literal` matching uses [`Value::value_eq`],
/// the host language's `==`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Ordered entries; keys are not required to be unique or hashable.
    Dict(Vec<(Value, Value)>),
    Object(Box<Object>),
}

/// Instance of a user-declared class.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub class: TypeId,
    pub fields: IndexMap<String, Value>,
    /// Sequence payload for instances of classes deriving from `list` or `tuple`.
    pub items: Option<Vec<Value>>,
}

impl Object {
    pub fn new(class: TypeId) -> Self {
        Self {
            class,
            fields: IndexMap::new(),
            items: None,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = Some(items);
        self
    }
}

impl Value {
    pub fn str(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    pub fn object(object: Object) -> Self {
        Self::Object(Box::new(object))
    }

    /// The value's own (minimal) plain type.
    pub fn type_id(&self) -> TypeId {
        match self {
            Self::None => TypeId::NONE,
            Self::Bool(_) => TypeId::BOOL,
            Self::Int(_) => TypeId::INT,
            Self::Float(_) => TypeId::FLOAT,
            Self::Str(_) => TypeId::STR,
            Self::List(_) => TypeId::LIST,
            Self::Tuple(_) => TypeId::TUPLE,
            Self::Dict(_) => TypeId::DICT,
            Self::Object(object) => object.class,
        }
    }

    /// Positional items of sequence-backed values.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            Self::Object(object) => object.items.as_deref(),
            _ => None,
        }
    }

    /// Entries of mapping values.
    pub fn entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Elements produced by iterating the value.
    ///
    /// Sequences yield their items, strings yield one-character strings and
    /// dicts yield their keys. Scalars are not iterable.
    pub fn elements(&self) -> Option<Box<dyn Iterator<Item = Cow<'_, Value>> + '_>> {
        match self {
            Self::Str(text) => Some(Box::new(
                text.chars().map(|ch| Cow::Owned(Self::Str(ch.to_string()))),
            )),
            Self::Dict(entries) => Some(Box::new(entries.iter().map(|(key, _)| Cow::Borrowed(key)))),
            _ => {
                let items = self.items()?;
                Some(Box::new(items.iter().map(Cow::Borrowed)))
            }
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Object(object) => object.fields.get(name),
            _ => None,
        }
    }

    /// Host-language equality.
    ///
    /// `bool`, `int` and `float` compare by numeric value (`True == 1 == 1.0`),
    /// dicts compare as unordered entry sets, and containers compare
    /// element-wise with the same rules. A list never equals a tuple.
    pub fn value_eq(&self, other: &Value) -> bool {
        if let (Some(left), Some(right)) = (self.numeric(), other.numeric()) {
            return left == right;
        }
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::List(left), Self::List(right)) | (Self::Tuple(left), Self::Tuple(right)) => {
                all_value_eq(left, right)
            }
            (Self::Dict(left), Self::Dict(right)) => {
                left.len() == right.len()
                    && left.iter().all(|(key, item)| {
                        right.iter().any(|(other_key, other_item)| {
                            key.value_eq(other_key) && item.value_eq(other_item)
                        })
                    })
            }
            (Self::Object(left), Self::Object(right)) => {
                left.class == right.class
                    && left.fields.len() == right.fields.len()
                    && left.fields.iter().all(|(name, field)| {
                        right.fields.get(name).is_some_and(|other| field.value_eq(other))
                    })
                    && match (&left.items, &right.items) {
                        (Some(left), Some(right)) => all_value_eq(left, right),
                        (None, None) => true,
                        _ => false,
                    }
            }
            _ => false,
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        match *self {
            Self::Bool(flag) => Some(Numeric::Int(i64::from(flag))),
            Self::Int(n) => Some(Numeric::Int(n)),
            Self::Float(x) => Some(Numeric::Float(x)),
            _ => None,
        }
    }
}

fn all_value_eq(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.value_eq(r))
}

/// Numeric view of `bool`/`int`/`float` for cross-type comparison.
#[derive(Clone, Copy, Debug)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            // Exact: only integral floats inside the i64 range can match.
            (Self::Int(n), Self::Float(x)) | (Self::Float(x), Self::Int(n)) => {
                x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 && x as i64 == n
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
