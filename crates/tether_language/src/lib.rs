//! Typed command pipelines: parsing, resolution and invocation.
//!
//! This crate provides:
//! - [`Cursor`] - Backtracking text cursor over one source line
//! - [`Catalog`] and [`Command`] - The contract a command registry fulfils
//! - [`Stage`] - One resolved command with its bound arguments and overload
//! - [`Pipeline`] - A type-checked chain of stages, and its executor
//! - [`Block`] - A pipeline embedded as an argument, braced or single-stage
//! - [`HostContext`] - The error sink and output channel commands talk to
//!
//! # Example
//!
//! ```text
//! select filter:bytag "light" count
//! range 10 where { mul 2 gt 5 } sum
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arguments;
pub mod block;
pub mod catalog;
pub mod context;
pub mod cursor;
pub mod pipeline;
pub mod stage;


pub use arguments::{Argument, Arguments, Bundle, ParsedArguments};
pub use block::Block;
pub use catalog::{ArgumentContext, Catalog, Command, CommandFault, CommandResult, Invocable};
pub use context::{BufferedContext, HostContext};
pub use cursor::{Checkpoint, Cursor, Word, is_name_char};
pub use pipeline::{ParseOptions, Pipeline, parse_line};
pub use stage::{NOT_KEYWORD, Stage};
