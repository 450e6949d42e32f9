//! Command registry and standard commands for tether.
//!
//! This crate provides a concrete [`Catalog`](tether_language::Catalog):
//! - [`CommandRegistry`] - Name to command lookup, listing and help text
//! - [`CommandDef`] - Declarative commands with a signature-keyed overload table
//! - [`Param`] - The one-token-per-parameter argument grammar
//! - [`standard_registry`] - Text, numeric, list, item and output commands

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod builtins;
pub mod command;
pub mod grammar;
pub mod registry;

#[cfg(test)]
mod testing;

use im::Vector;
use tether_foundation::{Item, Value};

pub use builtins::BuiltinError;
pub use command::{CommandDef, InputPattern, Overload, ReturnRule};
pub use grammar::{Param, ParamKind};
pub use registry::CommandRegistry;

/// The items `select` produces in [`standard_registry`].
#[must_use]
pub fn default_items() -> Vec<Item> {
    vec![
        Item::new("lamp").with_tags(["brass", "light"]),
        Item::new("sword").with_tags(["metal", "weapon"]),
        Item::new("apple").with_tag("food"),
        Item::new("torch").with_tags(["light", "wood"]),
    ]
}

/// Creates a registry with every standard command and [`default_items`].
#[must_use]
pub fn standard_registry() -> CommandRegistry {
    standard_registry_with_items(default_items())
}

/// Creates a registry with every standard command, selecting from `items`.
#[must_use]
pub fn standard_registry_with_items(items: impl IntoIterator<Item = Item>) -> CommandRegistry {
    let items: Vector<Value> = items.into_iter().map(Value::Item).collect();
    let mut registry = CommandRegistry::new();
    builtins::register_all(&mut registry, items);
    registry
}
