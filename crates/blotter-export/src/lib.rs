//! Export stage: result tables out to canonical CSV files.
//!
//! Each report is written through the engine's directory writer, then
//! the directory is swept: marker and sidecar files deleted, part files
//! classified by header and renamed to their canonical report names.
//! Canonical files from a previous run are cleared up front so a rerun
//! cannot mix old and new output.

mod sweep;

pub use sweep::sweep_directory;

use blotter_common::{Error, ReportKind, Result};
use blotter_engine::{write_csv_dir, Table};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Export every result into `out_dir`, in the order given.
pub fn export_all(results: &[(ReportKind, Table)], out_dir: &Path) -> Result<()> {
    clean_previous_exports(out_dir)?;
    for (kind, table) in results {
        export_report(*kind, table, out_dir)?;
    }
    Ok(())
}

/// Write one result table and settle the directory around it.
pub fn export_report(kind: ReportKind, table: &Table, out_dir: &Path) -> Result<()> {
    write_csv_dir(table, out_dir)
        .map_err(|err| Error::export(format!("writing {kind}: {err}")))?;
    sweep_directory(out_dir)?;
    info!(
        report = %kind,
        file = kind.file_name(),
        rows = table.row_count(),
        "report exported"
    );
    Ok(())
}

/// Delete canonical report files left over from an earlier run. A
/// directory that does not exist yet is fine; the writer creates it.
pub fn clean_previous_exports(out_dir: &Path) -> Result<()> {
    if !out_dir.is_dir() {
        return Ok(());
    }
    for kind in ReportKind::ALL {
        let path = out_dir.join(kind.file_name());
        if path.is_file() {
            fs::remove_file(&path)
                .map_err(|err| Error::export(format!("removing {}: {err}", path.display())))?;
            debug!(file = kind.file_name(), "stale export removed");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blotter_engine::{Field, Schema, Value};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn table(columns: &[(&str, bool)], row: Vec<Value>) -> Table {
        let fields = columns
            .iter()
            .map(|(name, numeric)| {
                if *numeric {
                    Field::integer(*name)
                } else {
                    Field::text(*name)
                }
            })
            .collect();
        Table::from_rows(Schema::new(fields), vec![row]).unwrap()
    }

    fn sample_results() -> Vec<(ReportKind, Table)> {
        vec![
            (
                ReportKind::CrimesPerArea,
                table(
                    &[("Area", false), ("Premise", false), ("NumberOfCrimes", true)],
                    vec![
                        Value::Text("Central".into()),
                        Value::Text("Street".into()),
                        Value::Int(3),
                    ],
                ),
            ),
            (
                ReportKind::TopTenCrimes,
                table(
                    &[("Top10Crimes", false), ("NumberOfCrimes", true)],
                    vec![Value::Text("Battery".into()), Value::Int(3)],
                ),
            ),
            (
                ReportKind::CrimesPerMonth,
                table(
                    &[("Year", true), ("Month", true), ("CrimesPerMonth", true)],
                    vec![Value::Int(2020), Value::Int(3), Value::Int(2)],
                ),
            ),
            (
                ReportKind::CaseStatusPerCrime,
                table(
                    &[("Crime", false), ("CaseStatus", false), ("NumberOfCrimes", true)],
                    vec![
                        Value::Text("Battery".into()),
                        Value::Text("Invest Cont".into()),
                        Value::Int(3),
                    ],
                ),
            ),
            (
                ReportKind::CrimesPerDescentSexAge,
                table(
                    &[
                        ("Descent", false),
                        ("Sex", false),
                        ("Age", true),
                        ("NumberOfCrimes", true),
                    ],
                    vec![
                        Value::Text("Hispanic".into()),
                        Value::Text("M".into()),
                        Value::Int(34),
                        Value::Int(3),
                    ],
                ),
            ),
        ]
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn export_dir(tmp: &TempDir) -> PathBuf {
        tmp.path().join("SparkExports")
    }

    #[test]
    fn export_all_leaves_exactly_the_five_canonical_files() {
        let tmp = TempDir::new().unwrap();
        let dir = export_dir(&tmp);
        export_all(&sample_results(), &dir).unwrap();

        assert_eq!(
            listing(&dir),
            vec![
                "CaseStatusPerCrime.csv",
                "CrimesPerArea.csv",
                "CrimesPerCountryGenderAge.csv",
                "CrimesPerMonth.csv",
                "TopTenCrimes.csv",
            ]
        );
        let area = fs::read_to_string(dir.join("CrimesPerArea.csv")).unwrap();
        assert_eq!(area, "Area,Premise,NumberOfCrimes\nCentral,Street,3\n");
    }

    #[test]
    fn rerun_produces_identical_output() {
        let tmp = TempDir::new().unwrap();
        let dir = export_dir(&tmp);
        export_all(&sample_results(), &dir).unwrap();
        let first = fs::read_to_string(dir.join("CrimesPerMonth.csv")).unwrap();

        export_all(&sample_results(), &dir).unwrap();
        let second = fs::read_to_string(dir.join("CrimesPerMonth.csv")).unwrap();

        assert_eq!(first, second);
        assert_eq!(listing(&dir).len(), 5);
    }

    #[test]
    fn clean_previous_exports_tolerates_a_missing_directory() {
        let tmp = TempDir::new().unwrap();
        clean_previous_exports(&tmp.path().join("never-created")).unwrap();
    }

    #[test]
    fn foreign_files_in_the_export_directory_survive() {
        let tmp = TempDir::new().unwrap();
        let dir = export_dir(&tmp);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("notes.csv"), "Alpha,Beta\n1,2\n").unwrap();

        export_all(&sample_results(), &dir).unwrap();

        assert!(dir.join("notes.csv").is_file());
        assert_eq!(listing(&dir).len(), 6);
    }
}
