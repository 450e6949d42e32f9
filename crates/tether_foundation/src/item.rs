//! Named, tagged records.

use std::fmt;
use std::sync::Arc;

use im::OrdSet;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A named record carrying a set of tags.
///
/// Items stand in for whatever entities the host exposes to the command line.
/// Cloning is cheap: the name is shared and the tag set is persistent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Item {
    name: Arc<str>,
    tags: OrdSet<Arc<str>>,
}

impl Item {
    /// Creates an untagged item.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            tags: OrdSet::new(),
        }
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Arc<str>>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Adds several tags.
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<str>>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Returns the item's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the item's tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(AsRef::as_ref)
    }

    /// Returns true if the item carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags().collect();
            write!(f, " [{}]", tags.join(", "))?;
        }
        Ok(())
    }
}
