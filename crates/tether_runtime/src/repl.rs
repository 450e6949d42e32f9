//! The main REPL implementation.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tether_foundation::Value;
use tether_language::{HostContext, ParseOptions, Pipeline, parse_line};
use tracing::{debug, info};

use crate::config::ReplConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor, is_complete};
use crate::error::{ReplError, Result};
use crate::session::Session;

const HELP: &str = "\
Type a pipeline to run it, e.g. `select filter:bytag \"light\" count`.
Stages are separated by whitespace; each consumes the previous result.
Blocks in braces are nested pipelines: `range 6 where { mul 2 gt 5 }`.

Meta commands:
  :help              Show this message
  :commands          List every command with a summary
  :type <pipeline>   Show the type of each stage without running it
  :quit              Exit (or Ctrl+D)";

/// Outcome of evaluating a script file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Pipelines evaluated.
    pub pipelines: usize,
    /// Pipelines that failed to parse or run.
    pub failures: usize,
}

impl FileReport {
    /// Returns true if every pipeline succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.failures == 0
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} pipelines failed",
            self.failures, self.pipelines
        )
    }
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (catalog, output, counters).
    session: Session,

    /// Prompts and output settings.
    config: ReplConfig,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(config: ReplConfig) -> Result<Self> {
        let editor = RustylineEditor::new(&config)?;
        Ok(Self::with_editor(editor, config))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor and the standard catalog.
    pub fn with_editor(editor: E, config: ReplConfig) -> Self {
        let session = Session::with_catalog(tether_stdlib::standard_registry(), &config);
        let mut repl = Self {
            editor,
            session,
            config,
        };
        repl.sync_commands();
        repl
    }

    /// Replaces the session, and with it the catalog.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self.sync_commands();
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.config.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReplConfig {
        &self.config
    }

    fn sync_commands(&mut self) {
        let names = self
            .session
            .catalog()
            .names()
            .into_iter()
            .map(String::from)
            .collect();
        self.editor.set_commands(names);
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.config.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(ReplError::Editor(message)) => return Err(ReplError::Editor(message)),
                Err(e) => self.print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);
        self.execute(&input)
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.config.prompt
            } else {
                &self.config.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push('\n');
                    }
                    input.push_str(&line);

                    if is_complete(&input) {
                        return Ok(Some(input));
                    }

                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(ReplError::UnterminatedInput);
                }
            }
        }
    }

    /// Runs one line of input: a meta command or a pipeline whose result is
    /// printed.
    ///
    /// Returns `Ok(false)` when the input asks to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be printed.
    pub fn execute(&mut self, input: &str) -> Result<bool> {
        let trimmed = input.trim();
        if let Some(meta) = trimmed.strip_prefix(':') {
            return Ok(self.meta(meta));
        }

        if let Some(value) = self.eval(input) {
            self.session.print_value(&value)?;
        }
        Ok(true)
    }

    /// Parses and invokes one pipeline with no input.
    ///
    /// Diagnostics are written through the session; a failed parse or run
    /// yields `None`.
    pub fn eval(&mut self, source: &str) -> Option<Value> {
        let pipeline = self.parse(source, &ParseOptions::new())?;
        let result = pipeline.invoke(Value::Unit, &mut self.session);
        self.session.record_evaluation(result.is_some());
        debug!(
            evaluation = self.session.evaluations(),
            ok = result.is_some(),
            "evaluated pipeline"
        );
        result
    }

    fn parse(&mut self, source: &str, options: &ParseOptions) -> Option<Pipeline> {
        match parse_line(source, self.session.catalog(), options) {
            Ok(pipeline) => Some(pipeline),
            Err(diagnostic) => {
                self.session.write_diagnostic(&diagnostic);
                self.session.record_evaluation(false);
                None
            }
        }
    }

    /// Handles a meta command (without its leading `:`).
    fn meta(&mut self, command: &str) -> bool {
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .unwrap_or((command, ""));

        match name {
            "quit" | "q" => return false,
            "help" | "h" => {
                for line in HELP.lines() {
                    self.session.write_line(line);
                }
            }
            "commands" => self.print_commands(),
            "type" | "t" => self.print_types(rest),
            other => {
                self.session
                    .write_line(&format!("unknown meta command ':{other}' (try :help)"));
            }
        }
        true
    }

    fn print_commands(&mut self) {
        let described = self.session.catalog().describe();
        let width = described.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
        for (usage, summary) in described {
            self.session
                .write_line(&format!("  {usage:<width$}  {summary}"));
        }
    }

    fn print_types(&mut self, source: &str) {
        let Some(pipeline) = self.parse(source, &ParseOptions::new().allow_empty()) else {
            return;
        };
        for stage in pipeline.stages() {
            let name = match stage.subcommand() {
                Some(sub) => format!("{}:{sub}", stage.name()),
                None => stage.name().to_string(),
            };
            self.session.write_line(&format!(
                "  {name}: {} -> {}",
                stage.piped_type(),
                stage.return_type()
            ));
        }
        self.session.write_line(&format!(
            "{} -> {}",
            pipeline.piped_type(),
            pipeline.return_type()
        ));
    }

    /// Evaluates a script file: each non-blank line not starting with `#` is
    /// one pipeline. Evaluation continues past failing lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a result cannot be
    /// printed.
    pub fn eval_file(&mut self, path: &Path) -> Result<FileReport> {
        let source = fs::read_to_string(path).map_err(|source| ReplError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let report = self.eval_script(&source)?;
        info!(path = %path.display(), pipelines = report.pipelines, failures = report.failures, "evaluated file");
        Ok(report)
    }

    /// Evaluates script text the way [`Repl::eval_file`] does.
    ///
    /// # Errors
    ///
    /// Returns an error if a result cannot be printed.
    pub fn eval_script(&mut self, source: &str) -> Result<FileReport> {
        let mut report = FileReport::default();
        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            report.pipelines += 1;
            match self.eval(line) {
                Some(value) => self.session.print_value(&value)?,
                None => report.failures += 1,
            }
        }
        Ok(report)
    }

    /// Prints an error to stderr.
    fn print_error(&self, error: &ReplError) {
        if self.config.color {
            eprintln!("\x1b[31mError: {error}\x1b[0m");
        } else {
            eprintln!("Error: {error}");
        }
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        if self.config.color {
            println!("\x1b[1;36mtether\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        } else {
            println!("tether v{}", env!("CARGO_PKG_VERSION"));
        }
        println!("Type a pipeline to run it, :help for help. Use Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}
