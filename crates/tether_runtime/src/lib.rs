//! REPL, CLI, and host session for tether.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-eval-print loop over a swappable [`LineEditor`]
//! - [`Session`] - The [`HostContext`](tether_language::HostContext) pipelines run against
//! - [`ReplConfig`] - Prompt, color and output settings
//! - The `tether` command-line binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod repl;
pub mod session;

pub use config::ReplConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use error::{ReplError, Result};
pub use highlight::PipelineHighlighter;
pub use repl::{FileReport, Repl};
pub use session::Session;
