//! Errors raised by the runtime layer.
//!
//! Pipeline failures are not errors at this level: they are rendered through
//! the [`Session`](crate::Session) and the REPL moves on. These variants cover
//! the terminal and the file system.

use std::path::PathBuf;

use thiserror::Error;

/// A runtime failure.
#[derive(Debug, Error)]
pub enum ReplError {
    /// The line editor failed.
    #[error("line editor: {0}")]
    Editor(String),

    /// A script file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Input ended in the middle of a multi-line pipeline.
    #[error("unexpected end of input inside a block")]
    UnterminatedInput,

    /// A value could not be serialized for `--json` output.
    #[error("json output: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the terminal failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, ReplError>;
