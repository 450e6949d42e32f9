//! Host context: the narrow interface command implementations talk to.

use tether_foundation::Diagnostic;

/// Services the host supplies to a running pipeline.
///
/// Each invocation should get its own context. Pipelines hold no mutable
/// state of their own, so sharing one across concurrent invocations is the
/// only way to make them interfere.
pub trait HostContext {
    /// Records an error. The running pipeline stops after the current stage.
    fn report_error(&mut self, diagnostic: Diagnostic);

    /// Drains and returns the errors reported so far.
    fn take_errors(&mut self) -> Vec<Diagnostic>;

    /// Returns true if errors are pending.
    fn has_errors(&self) -> bool;

    /// Writes one line of output.
    fn write_line(&mut self, line: &str);

    /// Writes a rendered diagnostic.
    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.write_line(&diagnostic.render());
    }
}

/// A context that keeps everything in memory.
#[derive(Debug, Default)]
pub struct BufferedContext {
    errors: Vec<Diagnostic>,
    lines: Vec<String>,
}

impl BufferedContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lines written so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drains the lines written so far.
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl HostContext for BufferedContext {
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
        self.lines.push(line.to_string());
    }
}
