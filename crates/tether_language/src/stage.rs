//! Stage resolution: one command of a pipeline.
//!
//! A stage is parsed against the type piped into it. Resolution reads the
//! modifiers, the command name and subcommand, lets the command parse its
//! arguments, then looks up an overload and its static return type. Nothing
//! is invoked until the whole pipeline has been built.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use tether_foundation::{Diagnostic, Result, Span, Type, Value};

use crate::arguments::Bundle;
use crate::catalog::{ArgumentContext, Catalog, Command, Invocable};
use crate::context::HostContext;
use crate::cursor::{Cursor, Word, is_name_char};

/// The modifier keyword that sets a stage's inversion flag.
pub const NOT_KEYWORD: &str = "not";

/// A resolved pipeline stage.
///
/// Immutable once parsed; may be invoked any number of times.
#[derive(Clone)]
pub struct Stage {
    command: Arc<dyn Command>,
    bundle: Bundle,
    invocable: Invocable,
    return_type: Type,
    span: Span,
}

impl Stage {
    /// Parses and resolves one stage against the given piped type.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic if no stage can be resolved here. The cursor is
    /// left exactly where it was.
    pub fn parse(cursor: &mut Cursor, catalog: &dyn Catalog, piped: &Type) -> Result<Self> {
        cursor.attempt(|cursor| Self::resolve(cursor, catalog, piped))
    }

    fn resolve(cursor: &mut Cursor, catalog: &dyn Catalog, piped: &Type) -> Result<Self> {
        cursor.skip_whitespace();
        let start = cursor.offset();

        let mut inverted = false;
        if cursor
            .peek_word(is_name_char)
            .is_some_and(|word| word.text == NOT_KEYWORD)
        {
            cursor.get_word(is_name_char);
            cursor.skip_whitespace();
            inverted = true;
        }

        let Some(name) = cursor.get_word(is_name_char) else {
            return Err(
                Diagnostic::out_of_input("a command name").at(Span::at(cursor.offset()))
            );
        };

        let command = catalog
            .command(&name.text)
            .ok_or_else(|| Diagnostic::unknown_command(&name.text).at(name.span))?;

        let subcommand = match command.subcommands() {
            Some(valid) => Some(Self::resolve_subcommand(cursor, &name, valid)?),
            None => None,
        };

        let mut end = cursor.offset();
        let after_name = cursor.save();
        cursor.skip_whitespace();
        let args_start = cursor.offset();

        let context = ArgumentContext {
            piped,
            subcommand: subcommand.as_deref(),
            catalog,
        };
        let parsed = command
            .parse_arguments(cursor, &context)
            .map_err(|diagnostic| {
                if diagnostic.span.is_some() {
                    diagnostic
                } else {
                    diagnostic.at(cursor.span_from(args_start))
                }
            })?;
        if cursor.offset() > args_start {
            end = cursor.offset();
        } else {
            cursor.restore(after_name);
        }
        let span = Span::new(start, end);

        let no_implementation = || {
            Diagnostic::no_implementation(
                &name.text,
                subcommand.clone(),
                parsed.type_args.clone(),
                piped.clone(),
            )
            .at(span)
        };
        let invocable = command
            .implementation(piped, subcommand.as_deref(), &parsed.type_args)
            .ok_or_else(no_implementation)?;
        let return_type = command
            .return_type(subcommand.as_deref(), piped, &parsed.type_args)
            .ok_or_else(no_implementation)?;

        debug!(
            command = %name.text,
            subcommand = subcommand.as_deref().unwrap_or(""),
            piped = %piped,
            returns = %return_type,
            "resolved stage"
        );

        Ok(Self {
            command,
            bundle: Bundle {
                inverted: inverted != parsed.inverted,
                subcommand,
                arguments: parsed.arguments,
                type_args: parsed.type_args,
                piped: piped.clone(),
            },
            invocable,
            return_type,
            span,
        })
    }

    fn resolve_subcommand(cursor: &mut Cursor, name: &Word, valid: &[String]) -> Result<String> {
        if !cursor.eat_match(':') {
            return Err(
                Diagnostic::unknown_subcommand(&name.text, "", valid.to_vec())
                    .at(Span::at(cursor.offset())),
            );
        }
        let Some(word) = cursor.get_word(is_name_char) else {
            return Err(Diagnostic::out_of_input(format!(
                "a subcommand for '{}'",
                name.text
            ))
            .at(Span::at(cursor.offset())));
        };
        if !valid.iter().any(|v| *v == word.text) {
            return Err(
                Diagnostic::unknown_subcommand(&name.text, &word.text, valid.to_vec())
                    .at(word.span),
            );
        }
        Ok(word.text)
    }

    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.command.name()
    }

    /// Returns the resolved subcommand.
    #[must_use]
    pub fn subcommand(&self) -> Option<&str> {
        self.bundle.subcommand.as_deref()
    }

    /// Returns the bound argument bundle.
    #[must_use]
    pub const fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// Returns the piped-input type this stage was resolved against.
    #[must_use]
    pub const fn piped_type(&self) -> &Type {
        &self.bundle.piped
    }

    /// Returns the static return type.
    #[must_use]
    pub const fn return_type(&self) -> &Type {
        &self.return_type
    }

    /// Returns the stage's span in the source line.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Invokes the stage.
    ///
    /// Faults (an `Err` result or a panic) never escape: they are reported to
    /// the context as an unhandled-fault diagnostic and `Unit` is returned.
    pub fn invoke(&self, piped: Value, ctx: &mut dyn HostContext) -> Value {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            (self.invocable)(&self.bundle, piped, &mut *ctx)
        }));

        match outcome {
            Ok(Ok(value)) => value,
            Ok(Err(fault)) => {
                warn!(command = self.name(), fault = %fault, "command faulted");
                ctx.report_error(Diagnostic::unhandled(
                    self.name(),
                    fault.message(),
                    fault.trace(),
                ));
                Value::Unit
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(command = self.name(), panic = %message, "command panicked");
                ctx.report_error(Diagnostic::unhandled(
                    self.name(),
                    message,
                    vec![format!("panic inside '{}'", self.name())],
                ));
                Value::Unit
            }
        }
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name())
            .field("bundle", &self.bundle)
            .field("return_type", &self.return_type)
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "command panicked".to_string()
    }
}
