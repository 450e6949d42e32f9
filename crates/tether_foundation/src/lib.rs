//! Spans, types, values, and diagnostics for tether.
//!
//! This crate provides:
//! - [`Span`] - Byte ranges into a pipeline's source line
//! - [`Type`] - Static type descriptors used for overload resolution
//! - [`Value`] - The values threaded through a pipeline
//! - [`Item`] - Named, tagged records standing in for host entities
//! - [`Diagnostic`] - The closed set of parse and invocation errors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostic;
pub mod item;
pub mod span;
pub mod types;
pub mod value;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use item::Item;
pub use span::Span;
pub use types::Type;
pub use value::Value;

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, Diagnostic>;
