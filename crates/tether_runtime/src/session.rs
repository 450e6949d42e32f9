//! Session state for the REPL.
//!
//! The session owns the command catalog and is the [`HostContext`] every
//! pipeline runs against. Output goes to stdout unless the session was
//! created with [`Session::capturing`], in which case lines are kept for
//! inspection.

use tether_foundation::{Diagnostic, Value};
use tether_language::HostContext;
use tether_stdlib::{CommandRegistry, standard_registry};

use crate::config::ReplConfig;
use crate::error::Result;

/// Session state for an interactive or batch run.
pub struct Session {
    /// The catalog pipelines are resolved against.
    catalog: CommandRegistry,

    /// Whether diagnostics and results use ANSI colors.
    color: bool,

    /// Whether results are printed as JSON.
    json_output: bool,

    /// Errors reported by the running stage, drained by the executor.
    errors: Vec<Diagnostic>,

    /// Pipelines evaluated so far.
    evaluations: u64,

    /// Pipelines that failed to parse or run.
    failures: u64,

    /// Captured output lines, when not writing to stdout.
    captured: Option<Vec<String>>,
}

impl Session {
    /// Creates a session over the standard catalog with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(standard_registry(), &ReplConfig::default())
    }

    /// Creates a session over the given catalog.
    #[must_use]
    pub fn with_catalog(catalog: CommandRegistry, config: &ReplConfig) -> Self {
        Self {
            catalog,
            color: config.color,
            json_output: config.json_output,
            errors: Vec::new(),
            evaluations: 0,
            failures: 0,
            captured: None,
        }
    }

    /// Keeps output lines in memory instead of writing them to stdout.
    #[must_use]
    pub fn capturing(mut self) -> Self {
        self.captured = Some(Vec::new());
        self
    }

    /// Returns the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CommandRegistry {
        &self.catalog
    }

    /// Returns a mutable reference to the catalog.
    pub fn catalog_mut(&mut self) -> &mut CommandRegistry {
        &mut self.catalog
    }

    /// Returns the number of pipelines evaluated so far.
    #[must_use]
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Returns the number of pipelines that failed.
    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.failures
    }

    /// Counts one evaluation and whether it succeeded.
    pub fn record_evaluation(&mut self, succeeded: bool) {
        self.evaluations += 1;
        if !succeeded {
            self.failures += 1;
        }
    }

    /// Drains the captured output lines. Empty when writing to stdout.
    pub fn take_output(&mut self) -> Vec<String> {
        self.captured.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Prints a pipeline result. `Unit` prints nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON output is enabled and the value cannot be
    /// serialized.
    pub fn print_value(&mut self, value: &Value) -> Result<()> {
        if value.is_unit() {
            return Ok(());
        }
        let text = if self.json_output {
            serde_json::to_string(value)?
        } else if self.color {
            format!("\x1b[1m{value}\x1b[0m")
        } else {
            value.to_string()
        };
        self.write_line(&text);
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl HostContext for Session {
    fn report_error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    fn take_errors(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.errors)
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn write_line(&mut self, line: &str) {
        match &mut self.captured {
            Some(lines) => lines.push(line.to_string()),
            None => println!("{line}"),
        }
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) {
        let rendered = diagnostic.render();
        if self.color {
            self.write_line(&format!("\x1b[31m{rendered}\x1b[0m"));
        } else {
            self.write_line(&rendered);
        }
    }
}
