//! Values threaded through a pipeline.

use std::fmt;
use std::sync::Arc;

use im::Vector;

use crate::item::Item;
use crate::types::Type;

/// A runtime value.
///
/// Values are immutable and cheaply cloneable. Lists use a persistent vector
/// and remember their static element type, so an empty list still knows
/// what it would contain.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The unit value (no input / no meaningful output).
    Unit,
    /// Boolean value.
    Bool(bool),
    /// Number value.
    Number(f64),
    /// Text value.
    Text(Arc<str>),
    /// Named, tagged record.
    Item(Item),
    /// Homogeneous persistent list.
    List {
        /// Static type of every element.
        element: Type,
        /// The elements.
        items: Vector<Value>,
    },
}

impl Value {
    /// Creates a text value.
    #[must_use]
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a list value with the given element type.
    #[must_use]
    pub fn list(element: Type, items: impl IntoIterator<Item = Value>) -> Self {
        Self::List {
            element,
            items: items.into_iter().collect(),
        }
    }

    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Unit => Type::Unit,
            Self::Bool(_) => Type::Bool,
            Self::Number(_) => Type::Number,
            Self::Text(_) => Type::Text,
            Self::Item(_) => Type::Item,
            Self::List { element, .. } => Type::list(element.clone()),
        }
    }

    /// Returns true if this value is unit.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a text reference.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract an item reference.
    #[must_use]
    pub const fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Attempts to extract the elements of a list.
    #[must_use]
    pub const fn as_list(&self) -> Option<&Vector<Value>> {
        match self {
            Self::List { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Formats a value nested inside a list, quoting text.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "()"),
            Self::Bool(b) => write!(f, "{b}"),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Item(item) => write!(f, "{item}"),
            Self::List { items, .. } => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unit => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Item(item) => serde::Serialize::serialize(item, serializer),
            Self::List { items, .. } => serializer.collect_seq(items.iter()),
        }
    }
}
