//! Engine-level failures.
//!
//! These are the low-level causes; the pipeline crates wrap them into
//! stage errors (`blotter_common::Error`) so the binary can report which
//! phase of the run went wrong and with which exit code.

use thiserror::Error;

/// Anything the engine itself can fail on.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `Session::open` rejects blank application names.
    #[error("application name must not be blank")]
    InvalidAppName,

    /// Lookup of a table that was never registered in the session.
    #[error("no such table: {0}")]
    NoSuchTable(String),

    /// Lookup of a column that is not part of the schema.
    #[error("no such column: {0}")]
    NoSuchColumn(String),

    /// A row with the wrong number of cells for its schema.
    #[error("row has {actual} cells, schema expects {expected}")]
    RowArity { expected: usize, actual: usize },

    /// A raw cell that does not parse as the declared field type.
    #[error("cannot coerce {value:?} to {ty} for field {field}")]
    Coerce {
        field: String,
        ty: &'static str,
        value: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
