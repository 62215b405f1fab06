//! The classify-and-rename pass over the export directory.
//!
//! The engine writes each report as an anonymous part file plus a
//! completion marker and checksum sidecars. One sweep deletes the
//! marker and sidecars, sniffs every remaining file's header row, and
//! renames recognized files to their canonical report names. Files that
//! match no report keyword are left untouched; a sweep never fails the
//! run over content it does not recognize.

use blotter_common::{Error, ReportKind, Result};
use blotter_engine::{CRC_SUFFIX, SUCCESS_MARKER};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Settle one directory after a report write.
pub fn sweep_directory(dir: &Path) -> Result<()> {
    // Snapshot the listing first; the loop renames and deletes entries.
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)
        .map_err(|err| Error::export(format!("listing {}: {err}", dir.display())))?
        .collect::<std::io::Result<_>>()
        .map_err(|err| Error::export(format!("listing {}: {err}", dir.display())))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();

        if name == SUCCESS_MARKER || name.ends_with(CRC_SUFFIX) {
            fs::remove_file(&path)
                .map_err(|err| Error::export(format!("removing {}: {err}", path.display())))?;
            debug!(file = %name, "engine artifact removed");
            continue;
        }

        match classify_file(&path) {
            Ok(Some(kind)) => {
                let target = dir.join(kind.file_name());
                if path != target {
                    fs::rename(&path, &target).map_err(|err| {
                        Error::export(format!(
                            "renaming {} to {}: {err}",
                            path.display(),
                            kind.file_name()
                        ))
                    })?;
                    debug!(from = %name, to = kind.file_name(), "export classified");
                }
            }
            Ok(None) => warn!(file = %name, "no report keyword in header, leaving file in place"),
            // Binary content (the chart images live here too) or an
            // unreadable header is not ours to classify.
            Err(err) => debug!(file = %name, %err, "header not readable, leaving file in place"),
        }
    }
    Ok(())
}

fn classify_file(path: &Path) -> Result<Option<ReportKind>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|err| Error::export(format!("reading header of {}: {err}", path.display())))?;
    let columns: Vec<String> = reader
        .headers()
        .map_err(|err| Error::export(format!("reading header of {}: {err}", path.display())))?
        .iter()
        .map(str::to_string)
        .collect();
    Ok(ReportKind::classify(columns.iter().map(String::as_str)))
}
