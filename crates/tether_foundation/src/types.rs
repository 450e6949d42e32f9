//! Type descriptors for overload resolution.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static type descriptor.
///
/// Every pipeline stage is resolved against the type of its piped input and
/// declares the type it returns. Comparison is structural, so two stages
/// chain only when the types are exactly equal.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// No input (the first stage of a top-level pipeline).
    #[default]
    Unit,
    /// Boolean type.
    Bool,
    /// 64-bit floating point number.
    Number,
    /// Text type.
    Text,
    /// Named, tagged record.
    Item,
    /// Homogeneous list type.
    List(Box<Type>),
}

impl Type {
    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Returns true if this is the `Unit` type.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// Returns true if this is a list type.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns the element type of a list type.
    #[must_use]
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::List(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "Unit"),
            Self::Bool => write!(f, "Bool"),
            Self::Number => write!(f, "Number"),
            Self::Text => write!(f, "Text"),
            Self::Item => write!(f, "Item"),
            Self::List(t) => write!(f, "List<{t:?}>"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
