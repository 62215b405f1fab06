//! Crime-blotter batch pipeline binary.
//!
//! Reads the seven pipe-delimited extracts from the working directory,
//! computes the five reports, renders the two images, and settles
//! canonical CSVs under `SparkExports/`. There are no flags; log
//! verbosity follows `RUST_LOG`, defaulting to info.
//!
//! Exit status is 0 on success, or the stage code of the first fatal
//! error (startup 10, ingestion 20, aggregation 30, export 40).
//! Rendering failures are logged and skipped, never fatal.

use blotter_common::{report, Error, ReportKind, Result};
use blotter_engine::{Session, Table};
use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application name registered with the engine session.
const APP_NAME: &str = "LACrimes";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let started = Instant::now();
    match run(Path::new(".")) {
        Ok(()) => {
            info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "pipeline complete"
            );
        }
        Err(err) => {
            error!(stage = err.stage(), code = err.code(), "{err}");
            info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "pipeline aborted"
            );
            process::exit(err.code());
        }
    }
}

fn run(base_dir: &Path) -> Result<()> {
    info!("opening engine session");
    let mut session = Session::open(APP_NAME).map_err(|err| Error::startup(err.to_string()))?;
    info!(id = %session.id(), "session open");

    info!("loading extracts");
    blotter_ingest::load_all(&mut session, base_dir)?;

    info!("computing reports");
    let results = blotter_reports::run_all(&session)?;

    let out_dir = base_dir.join(report::EXPORT_DIR);
    fs::create_dir_all(&out_dir)
        .map_err(|err| Error::export(format!("creating {}: {err}", out_dir.display())))?;

    info!("rendering images");
    render_images(&results, &out_dir)?;

    info!("exporting reports");
    blotter_export::export_all(&results, &out_dir)?;

    session.close();
    Ok(())
}

/// Draw both images. Recoverable failures are logged and skipped, so
/// the CSV export still runs when no raster backend or font is usable;
/// anything fatal propagates.
fn render_images(results: &[(ReportKind, Table)], out_dir: &Path) -> Result<()> {
    for (kind, table) in results {
        let outcome = match kind {
            ReportKind::TopTenCrimes => blotter_render::render_top_ten_chart(
                table,
                &out_dir.join(report::TOP_TEN_PLOT_FILE),
            ),
            ReportKind::CrimesPerMonth => blotter_render::render_month_pivot(
                table,
                &out_dir.join(report::MONTH_PIVOT_PLOT_FILE),
            ),
            _ => continue,
        };
        if let Err(err) = outcome {
            if err.is_fatal() {
                return Err(err);
            }
            warn!(report = %kind, "{err}");
        }
    }
    Ok(())
}
