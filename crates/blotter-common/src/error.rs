//! Error types for the Blotter pipeline.
//!
//! One variant per pipeline stage. The driver decides terminal versus
//! recoverable handling by matching the variant: everything except `Render`
//! aborts the run. Components construct their own stage variant at the point
//! of failure; there are deliberately no blanket `From` impls for I/O
//! errors, so stage attribution is always explicit.

use thiserror::Error;

/// Result type alias for Blotter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified stage-coded error for the Blotter pipeline.
#[derive(Error, Debug)]
pub enum Error {
    // Startup (10): acquiring the aggregation engine session
    #[error("failed to open engine session: {0}")]
    Startup(String),

    // Ingestion (20): malformed/unreadable input or schema mismatch
    #[error("failed to load {table}: {message}")]
    Ingestion { table: String, message: String },

    // Aggregation (30): query execution failure
    #[error("query {query} failed: {message}")]
    Aggregation { query: String, message: String },

    // Export (40): writing, classifying, or renaming output files
    #[error("export failed: {0}")]
    Export(String),

    // Render (50): chart/image production; recoverable
    #[error("render failed: {0}")]
    Render(String),
}

impl Error {
    pub fn startup(message: impl Into<String>) -> Self {
        Error::Startup(message.into())
    }

    pub fn ingestion(table: impl Into<String>, message: impl ToString) -> Self {
        Error::Ingestion {
            table: table.into(),
            message: message.to_string(),
        }
    }

    pub fn aggregation(query: impl Into<String>, message: impl ToString) -> Self {
        Error::Aggregation {
            query: query.into(),
            message: message.to_string(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Error::Export(message.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        Error::Render(message.into())
    }

    /// Pipeline stage that produced this error, for log lines.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Startup(_) => "startup",
            Error::Ingestion { .. } => "ingestion",
            Error::Aggregation { .. } => "aggregation",
            Error::Export(_) => "export",
            Error::Render(_) => "render",
        }
    }

    /// Stable numeric code for this error; doubles as the process exit code.
    pub fn code(&self) -> i32 {
        match self {
            Error::Startup(_) => 10,
            Error::Ingestion { .. } => 20,
            Error::Aggregation { .. } => 30,
            Error::Export(_) => 40,
            Error::Render(_) => 50,
        }
    }

    /// A fatal error terminates the run; only rendering is recovered locally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Render(_))
    }
}
