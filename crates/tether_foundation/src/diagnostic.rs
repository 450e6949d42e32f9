//! Diagnostics for pipeline parsing and invocation.
//!
//! A [`Diagnostic`] is created as plain data at the point of failure. It may
//! already carry a span (parse errors know which word they rejected), but it
//! only learns the source text it belongs to when the owning pipeline calls
//! [`Diagnostic::contextualize`]. Errors reported by commands at invocation
//! time start with neither and inherit the span of the stage that ran them.

use std::fmt::Write as _;
use std::sync::Arc;

use thiserror::Error;

use crate::span::Span;
use crate::types::Type;

/// A parse or invocation error, optionally tied to source text.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
pub struct Diagnostic {
    /// The kind of error that occurred.
    pub kind: DiagnosticKind,
    /// Where in the source the error occurred, once known.
    pub span: Option<Span>,
    /// The full source text the span refers to, once contextualized.
    pub text: Option<Arc<str>>,
}

impl Diagnostic {
    /// Creates a new diagnostic with the given kind.
    #[must_use]
    pub const fn new(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            span: None,
            text: None,
        }
    }

    /// Attaches a span.
    #[must_use]
    pub const fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attaches the source text and, if no span was recorded yet, the given span.
    ///
    /// A span recorded at creation time is more precise than the enclosing
    /// stage's span, so it is kept.
    pub fn contextualize(&mut self, source: &Arc<str>, span: Span) {
        if self.span.is_none() {
            self.span = Some(span);
        }
        if self.text.is_none() {
            self.text = Some(Arc::clone(source));
        }
    }

    /// Builder form of [`Diagnostic::contextualize`].
    #[must_use]
    pub fn contextualized(mut self, source: &Arc<str>, span: Span) -> Self {
        self.contextualize(source, span);
        self
    }

    /// Creates an out-of-input error.
    #[must_use]
    pub fn out_of_input(expected: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::OutOfInput {
            expected: expected.into(),
        })
    }

    /// Creates an unknown command error.
    #[must_use]
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UnknownCommand { name: name.into() })
    }

    /// Creates an unknown subcommand error.
    ///
    /// An empty `given` means the subcommand was missing altogether.
    #[must_use]
    pub fn unknown_subcommand(
        command: impl Into<String>,
        given: impl Into<String>,
        valid: Vec<String>,
    ) -> Self {
        Self::new(DiagnosticKind::UnknownSubcommand {
            command: command.into(),
            given: given.into(),
            valid,
        })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::InvalidArgument {
            expected: expected.into(),
            found: found.into(),
        })
    }

    /// Creates a no-implementation error for the attempted signature.
    #[must_use]
    pub fn no_implementation(
        command: impl Into<String>,
        subcommand: Option<String>,
        type_args: Vec<Type>,
        piped: Type,
    ) -> Self {
        Self::new(DiagnosticKind::NoImplementation {
            command: command.into(),
            subcommand,
            type_args,
            piped,
        })
    }

    /// Creates a wrong-type error for a pipeline that missed its target type.
    #[must_use]
    pub const fn wrong_type(expected: Type, actual: Type, once: bool) -> Self {
        Self::new(DiagnosticKind::ExpressionOfWrongType {
            expected,
            actual,
            once,
        })
    }

    /// Creates a missing closing brace error.
    #[must_use]
    pub const fn missing_closing_brace() -> Self {
        Self::new(DiagnosticKind::MissingClosingBrace)
    }

    /// Creates an unhandled fault error.
    #[must_use]
    pub fn unhandled(
        command: impl Into<String>,
        message: impl Into<String>,
        trace: Vec<String>,
    ) -> Self {
        Self::new(DiagnosticKind::UnhandledException {
            command: command.into(),
            message: message.into(),
            trace,
        })
    }

    /// Creates an error reported by a command implementation.
    #[must_use]
    pub fn command(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Command {
            message: message.into(),
        })
    }

    /// Returns true if this is an out-of-input error.
    #[must_use]
    pub const fn is_out_of_input(&self) -> bool {
        matches!(self.kind, DiagnosticKind::OutOfInput { .. })
    }

    /// Renders the full, user-facing description.
    ///
    /// The first line is the message. When the diagnostic has been
    /// contextualized, the offending source line follows with a caret
    /// underline. Unhandled faults append their captured trace.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("error: {}", self.kind);

        if let (Some(source), Some(span)) = (&self.text, self.span) {
            let (line_no, column) = span.line_column(source);
            let line = source.lines().nth(line_no - 1).unwrap_or("");
            let width = span
                .text(source)
                .lines()
                .next()
                .map_or(0, |t| t.chars().count())
                .max(1);
            let _ = write!(
                out,
                "\n  {line}\n  {}{}",
                " ".repeat(column - 1),
                "^".repeat(width)
            );
        }

        if let DiagnosticKind::UnhandledException { trace, .. } = &self.kind {
            for frame in trace {
                let _ = write!(out, "\n    at {frame}");
            }
        }

        out
    }
}

/// The closed set of diagnostic kinds.
#[derive(Clone, Debug, Error)]
pub enum DiagnosticKind {
    /// A token was required but the input ended.
    #[error("expected {expected}, but reached the end of the input")]
    OutOfInput {
        /// What was expected.
        expected: String,
    },

    /// The command name is not in the catalog.
    #[error("unknown command '{name}'")]
    UnknownCommand {
        /// The name as written.
        name: String,
    },

    /// The command has subcommands, but the given one is not among them.
    #[error("{}", unknown_subcommand_message(.command, .given, .valid))]
    UnknownSubcommand {
        /// The command name.
        command: String,
        /// The subcommand as written (empty when missing).
        given: String,
        /// The valid subcommand names.
        valid: Vec<String>,
    },

    /// A command's argument grammar rejected a token.
    #[error("expected {expected}, found '{found}'")]
    InvalidArgument {
        /// What the grammar expected.
        expected: String,
        /// The text that was found instead.
        found: String,
    },

    /// No overload matches the piped type, subcommand and type arguments.
    #[error(
        "no implementation of `{}`",
        no_implementation_signature(.command, .subcommand, .type_args, .piped)
    )]
    NoImplementation {
        /// The command name.
        command: String,
        /// The subcommand, if any.
        subcommand: Option<String>,
        /// Type arguments inferred from the arguments.
        type_args: Vec<Type>,
        /// The piped input type.
        piped: Type,
    },

    /// A pipeline's final type differs from the type its context requires.
    #[error(
        "expected an expression of type {expected}, but got {actual}{}",
        wrap_hint(.once)
    )]
    ExpressionOfWrongType {
        /// The required type.
        expected: Type,
        /// The type the pipeline produced.
        actual: Type,
        /// Whether the pipeline was parsed in single-stage mode.
        once: bool,
    },

    /// A block opened with `{` never closed.
    #[error("missing closing '}}'")]
    MissingClosingBrace,

    /// A command implementation faulted during invocation.
    #[error("unhandled fault in '{command}': {message}")]
    UnhandledException {
        /// The command that faulted.
        command: String,
        /// The fault message.
        message: String,
        /// Captured cause chain, outermost first.
        trace: Vec<String>,
    },

    /// A command implementation reported an error through the host context.
    #[error("{message}")]
    Command {
        /// The reported message.
        message: String,
    },
}

/// Formats the signature a stage tried to resolve, e.g. `filter:bytag<Text> List<Item> -> ???`.
#[must_use]
pub fn attempted_signature(
    command: &str,
    subcommand: Option<&str>,
    type_args: &[Type],
    piped: &Type,
) -> String {
    let mut sig = command.to_string();
    if let Some(sub) = subcommand {
        sig.push(':');
        sig.push_str(sub);
    }
    if !type_args.is_empty() {
        let args: Vec<String> = type_args.iter().map(ToString::to_string).collect();
        let _ = write!(sig, "<{}>", args.join(", "));
    }
    let _ = write!(sig, " {piped} -> ???");
    sig
}

#[allow(clippy::ref_option)]
fn no_implementation_signature(
    command: &str,
    subcommand: &Option<String>,
    type_args: &[Type],
    piped: &Type,
) -> String {
    attempted_signature(command, subcommand.as_deref(), type_args, piped)
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn wrap_hint(once: &bool) -> &'static str {
    if *once {
        "; wrap chained commands in braces, e.g. { a b }"
    } else {
        ""
    }
}

fn unknown_subcommand_message(command: &str, given: &str, valid: &[String]) -> String {
    let expected = valid.join(", ");
    if given.is_empty() {
        format!("'{command}' requires a subcommand; expected one of: {expected}")
    } else {
        format!("'{command}' has no subcommand '{given}'; expected one of: {expected}")
    }
}
