//! tether - Typed command-pipeline interpreter
//!
//! This crate re-exports all layers of the tether system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: tether_runtime     REPL, CLI, host session
//! Layer 2: tether_stdlib      Command registry and standard commands
//! Layer 1: tether_language    Cursor, stage resolver, pipelines, blocks
//! Layer 0: tether_foundation  Core types (Span, Type, Value, Diagnostic)
//! ```

pub use tether_foundation as foundation;
pub use tether_language as language;
pub use tether_runtime as runtime;
pub use tether_stdlib as stdlib;
