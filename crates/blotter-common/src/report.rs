//! Report identity: logical names, canonical filenames, classification.
//!
//! The engine writes each result as an anonymously-named part file, so the
//! only robust way to map a physical file back to its report is its header
//! row. Each report owns one keyword that appears in its header and in no
//! earlier-precedence report's header; [`ReportKind::classify`] evaluates the
//! keywords in a fixed order, first match wins. The order is part of the
//! contract: the keyword sets are not mutually exclusive in general, and
//! reordering the table changes classification results.

use std::fmt;

/// Directory (under the working directory) receiving all exported artifacts.
pub const EXPORT_DIR: &str = "SparkExports";

/// Output filename for the top-ten-crimes bar chart.
pub const TOP_TEN_PLOT_FILE: &str = "TopTenCrimesPlot.png";

/// Output filename for the year-by-month pivot table image.
pub const MONTH_PIVOT_PLOT_FILE: &str = "CrimesPerMonthPlot.png";

/// The five reports produced by one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    CrimesPerArea,
    TopTenCrimes,
    CrimesPerMonth,
    CaseStatusPerCrime,
    CrimesPerDescentSexAge,
}

impl ReportKind {
    /// All reports in query-execution order.
    pub const ALL: [ReportKind; 5] = [
        ReportKind::CrimesPerArea,
        ReportKind::TopTenCrimes,
        ReportKind::CrimesPerMonth,
        ReportKind::CaseStatusPerCrime,
        ReportKind::CrimesPerDescentSexAge,
    ];

    /// Classification precedence: evaluated top to bottom, first match wins.
    pub const CLASSIFY_ORDER: [ReportKind; 5] = [
        ReportKind::CrimesPerDescentSexAge,
        ReportKind::CaseStatusPerCrime,
        ReportKind::CrimesPerMonth,
        ReportKind::TopTenCrimes,
        ReportKind::CrimesPerArea,
    ];

    /// Canonical filename of the exported CSV.
    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::CrimesPerArea => "CrimesPerArea.csv",
            ReportKind::TopTenCrimes => "TopTenCrimes.csv",
            ReportKind::CrimesPerMonth => "CrimesPerMonth.csv",
            ReportKind::CaseStatusPerCrime => "CaseStatusPerCrime.csv",
            // Legacy export name, kept for downstream consumers.
            ReportKind::CrimesPerDescentSexAge => "CrimesPerCountryGenderAge.csv",
        }
    }

    /// Header substring identifying this report's CSV output.
    pub fn keyword(self) -> &'static str {
        match self {
            ReportKind::CrimesPerDescentSexAge => "Descent",
            ReportKind::CaseStatusPerCrime => "CaseStatus",
            ReportKind::CrimesPerMonth => "Year",
            ReportKind::TopTenCrimes => "Top10Crimes",
            ReportKind::CrimesPerArea => "Premise",
        }
    }

    /// Classify a written file by its header columns.
    ///
    /// Returns `None` when no keyword matches; callers leave such files in
    /// place rather than failing the run.
    pub fn classify<'a, I>(header_columns: I) -> Option<ReportKind>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: Clone,
    {
        let columns = header_columns.into_iter();
        Self::CLASSIFY_ORDER.into_iter().find(|kind| {
            columns
                .clone()
                .any(|column| column.contains(kind.keyword()))
        })
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::CrimesPerArea => "CrimesPerArea",
            ReportKind::TopTenCrimes => "TopTenCrimeTypes",
            ReportKind::CrimesPerMonth => "CrimesPerMonth",
            ReportKind::CaseStatusPerCrime => "CaseStatusPerCrime",
            ReportKind::CrimesPerDescentSexAge => "CrimesPerDescentSexAge",
        };
        write!(f, "{}", name)
    }
}
