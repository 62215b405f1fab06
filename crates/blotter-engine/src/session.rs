//! The session handle a pipeline run opens before anything else.
//!
//! A `Session` is the registry of loaded tables plus a run identity for
//! log correlation. Ownership does the lifecycle work: `close` consumes
//! the handle, and `Drop` releases it anyway if a run bails out early.

use crate::error::EngineError;
use crate::table::Table;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// Identity of one pipeline run, e.g. `run-20260825-142233-9f31ab`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId(String);

impl RunId {
    fn generate() -> Self {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        let nonce = Uuid::new_v4().simple().to_string();
        RunId(format!("run-{stamp}-{}", &nonce[..6]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Open handle over the registered tables of one run.
#[derive(Debug)]
pub struct Session {
    id: RunId,
    app_name: String,
    tables: HashMap<String, Table>,
    opened: Instant,
    released: bool,
}

impl Session {
    /// Open a fresh session. The application name ends up in every log
    /// line of the run, so a blank one is refused.
    pub fn open(app_name: &str) -> Result<Self, EngineError> {
        if app_name.trim().is_empty() {
            return Err(EngineError::InvalidAppName);
        }
        let session = Self {
            id: RunId::generate(),
            app_name: app_name.to_string(),
            tables: HashMap::new(),
            opened: Instant::now(),
            released: false,
        };
        debug!(id = %session.id, app = %session.app_name, "session opened");
        Ok(session)
    }

    pub fn id(&self) -> &RunId {
        &self.id
    }

    /// Register a table under a name, replacing any previous table of
    /// the same name.
    pub fn register(&mut self, name: impl Into<String>, table: Table) {
        let name = name.into();
        debug!(id = %self.id, table = %name, rows = table.row_count(), "table registered");
        self.tables.insert(name, table);
    }

    pub fn table(&self, name: &str) -> Result<&Table, EngineError> {
        self.tables
            .get(name)
            .ok_or_else(|| EngineError::NoSuchTable(name.to_string()))
    }

    /// Registered table names, sorted for stable logging.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Release the session explicitly. Dropping does the same; this
    /// exists so the happy path reads as open/work/close.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.tables.clear();
        let elapsed_ms = self.opened.elapsed().as_millis() as u64;
        debug!(id = %self.id, elapsed_ms, "session released");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}
