//! The contract between the interpreter core and the command catalog.
//!
//! The core never decides which commands exist or how their arguments are
//! spelled. It asks a [`Catalog`] for a [`Command`], lets the command parse
//! its own arguments, and resolves an overload by an explicit signature
//! lookup that either yields an [`Invocable`] or nothing.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use tether_foundation::{Result, Type, Value};

use crate::arguments::{Bundle, ParsedArguments};
use crate::context::HostContext;
use crate::cursor::Cursor;

/// What a command implementation returns.
///
/// `Err` is a fault: something the implementation did not anticipate. Expected
/// failures (bad input values and the like) are reported through
/// [`HostContext::report_error`] instead.
pub type CommandResult = std::result::Result<Value, CommandFault>;

/// A bound, callable command implementation.
pub type Invocable = Arc<dyn Fn(&Bundle, Value, &mut dyn HostContext) -> CommandResult + Send + Sync>;

/// An unanticipated failure inside a command implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandFault {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl CommandFault {
    /// Creates a fault with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error.
    #[must_use]
    pub fn from_error(error: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    /// Returns the fault message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the chain of underlying causes, outermost first.
    #[must_use]
    pub fn trace(&self) -> Vec<String> {
        let mut frames = Vec::new();
        let mut cause = StdError::source(self);
        while let Some(err) = cause {
            frames.push(err.to_string());
            cause = err.source();
        }
        frames
    }
}

/// Context handed to a command's argument grammar.
#[derive(Clone, Copy)]
pub struct ArgumentContext<'a> {
    /// The piped-input type at this stage.
    pub piped: &'a Type,
    /// The resolved subcommand, if any.
    pub subcommand: Option<&'a str>,
    /// The catalog, for grammars that parse nested blocks.
    pub catalog: &'a dyn Catalog,
}

/// A registered command, as seen by the interpreter core.
pub trait Command: Send + Sync {
    /// The command's name.
    fn name(&self) -> &str;

    /// Valid subcommand names, or `None` if the command takes no subcommand.
    fn subcommands(&self) -> Option<&[String]>;

    /// Parses the command's own arguments from the cursor.
    ///
    /// The cursor sits just past the command name (and subcommand), after
    /// whitespace. The grammar decides how many words belong to it.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic if the arguments do not parse. The stage resolver
    /// restores the cursor and attaches the argument region as the span if
    /// the diagnostic carries none.
    fn parse_arguments(
        &self,
        cursor: &mut Cursor,
        context: &ArgumentContext<'_>,
    ) -> Result<ParsedArguments>;

    /// Resolves the implementation for a signature.
    fn implementation(
        &self,
        piped: &Type,
        subcommand: Option<&str>,
        type_args: &[Type],
    ) -> Option<Invocable>;

    /// Computes the static return type for a signature without invoking anything.
    fn return_type(&self, subcommand: Option<&str>, piped: &Type, type_args: &[Type])
    -> Option<Type>;
}

/// A registry of commands.
pub trait Catalog {
    /// Looks up a command by name.
    fn command(&self, name: &str) -> Option<Arc<dyn Command>>;
}
