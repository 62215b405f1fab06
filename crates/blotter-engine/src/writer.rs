//! CSV directory writer.
//!
//! A table lands on disk as a directory, not a bare file: one part file
//! holding header plus rows, a zero-byte `_SUCCESS` marker written last,
//! and a hidden `.crc` checksum sidecar (SHA-256 hex) next to each file
//! it emits. Writing into an existing directory appends a fresh part
//! file and re-stamps the marker, so repeated runs accumulate parts
//! until something downstream tidies the directory up.

use crate::error::EngineError;
use crate::table::Table;
use crate::value::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Marker file stamped after the part file is fully on disk.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Extension shared by every checksum sidecar.
pub const CRC_SUFFIX: &str = ".crc";

/// Sidecar name for a file in the same directory, e.g. `._SUCCESS.crc`.
pub fn crc_sidecar_name(file_name: &str) -> String {
    format!(".{file_name}{CRC_SUFFIX}")
}

/// Write `table` into `dir`, creating the directory if needed.
///
/// Returns the path of the part file that was written.
pub fn write_csv_dir(table: &Table, dir: &Path) -> Result<PathBuf, EngineError> {
    fs::create_dir_all(dir)?;
    let part_name = format!("part-00000-{}-c000.csv", Uuid::new_v4());
    let part_path = dir.join(&part_name);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.schema().header())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(Value::csv_cell))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| EngineError::Io(err.into_error()))?;

    fs::write(&part_path, &bytes)?;
    write_sidecar(dir, &part_name, &bytes)?;
    fs::write(dir.join(SUCCESS_MARKER), b"")?;
    write_sidecar(dir, SUCCESS_MARKER, b"")?;
    debug!(path = %part_path.display(), rows = table.row_count(), "table written");
    Ok(part_path)
}

fn write_sidecar(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<(), EngineError> {
    let digest = Sha256::digest(bytes);
    let body = format!("{}\n", hex::encode(digest));
    fs::write(dir.join(crc_sidecar_name(file_name)), body)?;
    Ok(())
}
