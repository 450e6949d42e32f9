//! Standard command implementations.
//!
//! Commands are organized by category:
//! - `text`: Text construction and manipulation
//! - `numeric`: Numbers, arithmetic and comparison
//! - `list`: Generic list operations, including predicate and projection blocks
//! - `items`: Selecting and inspecting tagged items
//! - `output`: Writing values to the host

mod items;
mod list;
mod numeric;
mod output;
mod text;

use im::Vector;
use thiserror::Error;

use tether_foundation::{Diagnostic, Item, Type, Value};
use tether_language::{Block, Bundle, CommandFault, CommandResult, HostContext};

use crate::registry::CommandRegistry;

/// Registers every standard command, with `items` as the selectable set.
pub(crate) fn register_all(registry: &mut CommandRegistry, items: Vector<Value>) {
    text::register(registry);
    numeric::register(registry);
    list::register(registry);
    items::register(registry, items);
    output::register(registry);
}

// =============================================================================
// Faults
// =============================================================================

/// A broken invariant inside a builtin.
///
/// Overload resolution guarantees the piped type, so these only surface if a
/// command is invoked outside a resolved stage.
#[derive(Debug, Error)]
pub enum BuiltinError {
    /// The piped value has the wrong shape.
    #[error("expected {expected} input, got {actual}")]
    UnexpectedInput {
        /// The expected shape.
        expected: &'static str,
        /// The type actually piped in.
        actual: Type,
    },

    /// A parameter was not bound.
    #[error("missing argument '{0}'")]
    MissingArgument(&'static str),
}

impl From<BuiltinError> for CommandFault {
    fn from(error: BuiltinError) -> Self {
        Self::from_error(error)
    }
}

fn unexpected(expected: &'static str, value: &Value) -> BuiltinError {
    BuiltinError::UnexpectedInput {
        expected,
        actual: value.value_type(),
    }
}

// =============================================================================
// Input and Argument Helpers
// =============================================================================

fn number_in(value: &Value) -> Result<f64, BuiltinError> {
    value.as_number().ok_or_else(|| unexpected("Number", value))
}

fn text_in(value: &Value) -> Result<&str, BuiltinError> {
    value.as_text().ok_or_else(|| unexpected("Text", value))
}

fn item_in(value: &Value) -> Result<&Item, BuiltinError> {
    value.as_item().ok_or_else(|| unexpected("Item", value))
}

fn list_in(value: &Value) -> Result<&Vector<Value>, BuiltinError> {
    value.as_list().ok_or_else(|| unexpected("List", value))
}

fn number_arg(bundle: &Bundle, name: &'static str) -> Result<f64, BuiltinError> {
    bundle
        .arguments
        .number(name)
        .ok_or(BuiltinError::MissingArgument(name))
}

fn text_arg<'a>(bundle: &'a Bundle, name: &'static str) -> Result<&'a str, BuiltinError> {
    bundle
        .arguments
        .text(name)
        .ok_or(BuiltinError::MissingArgument(name))
}

fn block_arg<'a>(bundle: &'a Bundle, name: &'static str) -> Result<&'a Block, BuiltinError> {
    bundle
        .arguments
        .block(name)
        .ok_or(BuiltinError::MissingArgument(name))
}

/// The element type of the piped list, as resolved at parse time.
fn element_type(bundle: &Bundle) -> Type {
    bundle.piped.element().cloned().unwrap_or(Type::Unit)
}

#[allow(clippy::cast_precision_loss)]
fn count_value(n: usize) -> Value {
    Value::Number(n as f64)
}

// =============================================================================
// Nested Evaluation
// =============================================================================

/// Runs a block once per item, stopping at the first error.
fn evaluate_each(
    block: &Block,
    items: &Vector<Value>,
    ctx: &mut dyn HostContext,
) -> Result<Vec<Value>, Diagnostic> {
    items
        .iter()
        .map(|item| block.run(item.clone(), &mut *ctx))
        .collect()
}

/// Runs a predicate block once per item.
fn test_each(
    block: &Block,
    items: &Vector<Value>,
    ctx: &mut dyn HostContext,
) -> Result<Vec<bool>, Diagnostic> {
    Ok(evaluate_each(block, items, ctx)?
        .iter()
        .map(|v| v.as_bool().unwrap_or(false))
        .collect())
}

/// Hands a nested block's diagnostic to the enclosing pipeline.
fn report(ctx: &mut dyn HostContext, diagnostic: Diagnostic) -> CommandResult {
    ctx.report_error(diagnostic);
    Ok(Value::Unit)
}
