//! Registry of command definitions.
//!
//! Stores and retrieves [`CommandDef`]s by name and serves as the
//! [`Catalog`] the pipeline parser consults.

use std::collections::HashMap;
use std::sync::Arc;

use tether_language::{Catalog, Command};
use tracing::trace;

use crate::command::CommandDef;

// =============================================================================
// CommandRegistry
// =============================================================================

/// Registry for storing and looking up commands.
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    /// Map from command name to definition.
    commands: HashMap<String, Arc<CommandDef>>,
}

impl CommandRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, def: CommandDef) {
        trace!(command = def.name(), "registering command");
        self.commands.insert(def.name().to_string(), Arc::new(def));
    }

    /// Builder form of [`CommandRegistry::register`].
    #[must_use]
    pub fn with(mut self, def: CommandDef) -> Self {
        self.register(def);
        self
    }

    /// Looks up a command definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandDef> {
        self.commands.get(name).map(|def| &**def)
    }

    /// Checks if a command is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns all registered command names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns one `(usage, summary)` pair per command, sorted by name.
    #[must_use]
    pub fn describe(&self) -> Vec<(String, String)> {
        self.names()
            .into_iter()
            .filter_map(|name| self.get(name))
            .map(|def| (def.usage(), def.summary().to_string()))
            .collect()
    }
}

impl Catalog for CommandRegistry {
    fn command(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands
            .get(name)
            .map(|def| Arc::clone(def) as Arc<dyn Command>)
    }
}
