//! REPL configuration.

/// Settings for a [`Repl`](crate::Repl) and its [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplConfig {
    /// Primary prompt.
    pub prompt: String,
    /// Prompt shown while a block is still open.
    pub continuation_prompt: String,
    /// Whether diagnostics and results use ANSI colors.
    pub color: bool,
    /// Whether results are printed as JSON.
    pub json_output: bool,
    /// Whether to print the welcome banner.
    pub show_banner: bool,
    /// Maximum number of history entries kept by the line editor.
    pub history_size: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "tether> ".to_string(),
            continuation_prompt: "   ... ".to_string(),
            color: true,
            json_output: false,
            show_banner: true,
            history_size: 1000,
        }
    }
}

impl ReplConfig {
    /// Settings for non-interactive use: no colors, no banner.
    #[must_use]
    pub fn plain() -> Self {
        Self::default().with_color(false).without_banner()
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enables or disables JSON output of results.
    #[must_use]
    pub const fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the history size.
    #[must_use]
    pub const fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }
}
