//! Bound arguments and the per-stage argument bundle.

use std::sync::Arc;

use tether_foundation::Type;

use crate::block::Block;

/// A single bound argument value produced by a command's argument grammar.
#[derive(Clone, Debug)]
pub enum Argument {
    /// A numeric literal.
    Number(f64),
    /// A quoted string or bare word.
    Text(Arc<str>),
    /// A nested pipeline, braced or single-stage.
    Block(Arc<Block>),
}

/// Named arguments in the order the grammar bound them.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    entries: Vec<(String, Argument)>,
}

impl Arguments {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an argument under a name.
    pub fn push(&mut self, name: impl Into<String>, argument: Argument) {
        self.entries.push((name.into(), argument));
    }

    /// Looks up an argument by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, argument)| argument)
    }

    /// Looks up a numeric argument.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Argument::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Looks up a text argument.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Argument::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a block argument.
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&Block> {
        match self.get(name)? {
            Argument::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Returns the number of bound arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no arguments are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, argument)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

/// What a command's argument grammar hands back to the stage resolver.
#[derive(Clone, Debug, Default)]
pub struct ParsedArguments {
    /// The bound argument values.
    pub arguments: Arguments,
    /// Type arguments inferred while parsing (e.g. a projection's result type).
    pub type_args: Vec<Type>,
    /// Whether the grammar consumed an inversion modifier of its own.
    pub inverted: bool,
}

/// Everything a command implementation receives besides its piped value.
///
/// Owned by the stage that created it and read-only afterwards.
#[derive(Clone, Debug)]
pub struct Bundle {
    /// Set by a `not` modifier.
    pub inverted: bool,
    /// The subcommand, for commands that declare them.
    pub subcommand: Option<String>,
    /// The bound arguments.
    pub arguments: Arguments,
    /// Explicit type arguments inferred during argument parsing.
    pub type_args: Vec<Type>,
    /// The piped-input type this stage was resolved against.
    pub piped: Type,
}

impl Bundle {
    /// Applies the inversion flag to a boolean outcome.
    #[must_use]
    pub const fn apply_inversion(&self, outcome: bool) -> bool {
        outcome != self.inverted
    }
}
