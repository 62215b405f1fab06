//! Pipe-delimited extract loading.
//!
//! Each file is read through its registry schema and registered in the
//! session as a typed table. Loading is all-or-nothing per file: the
//! first malformed row fails that file, and any file failure aborts the
//! run, since every report depends on all seven relations being whole.

use crate::registry::{datasets, DatasetDef, DELIMITER};
use blotter_common::{Error, Result};
use blotter_engine::{Session, Table};
use std::path::Path;
use tracing::info;

/// Load every extract from `base_dir` into the session, in registry
/// order.
pub fn load_all(session: &mut Session, base_dir: &Path) -> Result<()> {
    for def in datasets() {
        load_dataset(session, base_dir, &def)?;
    }
    Ok(())
}

/// Load one extract and register it under its table name.
pub fn load_dataset(session: &mut Session, base_dir: &Path, def: &DatasetDef) -> Result<()> {
    let path = base_dir.join(def.file_name);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_path(&path)
        .map_err(|err| Error::ingestion(def.file_name, err))?;

    let mut table = Table::new(def.schema());
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| Error::ingestion(def.file_name, err))?;
        // Header occupies line 1, so the first record is line 2.
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 2);
        let cells: Vec<&str> = record.iter().collect();
        let row = table
            .schema()
            .coerce_row(&cells)
            .map_err(|err| Error::ingestion(def.file_name, format!("line {line}: {err}")))?;
        table
            .push_row(row)
            .map_err(|err| Error::ingestion(def.file_name, format!("line {line}: {err}")))?;
    }

    info!(
        table = def.table_name,
        file = def.file_name,
        rows = table.row_count(),
        "extract loaded"
    );
    session.register(def.table_name, table);
    Ok(())
}
