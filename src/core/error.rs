//! Error types for the fallible edges of the crate.
//!
//! Gameplay never produces errors: illegal moves return the prior state and
//! terminal conditions are ordinary result variants. These enums cover the
//! two places that can genuinely fail: off-grid writes and score/config I/O.

use std::io;
use std::path::PathBuf;

/// Errors raised by [`crate::core::grid::Grid`] writes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    /// A write targeted a cell outside the grid.
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Errors from the score store and config loader.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file existed but did not contain valid JSON for the expected type.
    #[error("malformed json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
