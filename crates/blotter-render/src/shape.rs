//! Reshaping result tables into drawable form.
//!
//! Kept separate from the drawing code so the interesting logic stays
//! testable without a raster backend or fonts on the test host.

use blotter_common::{Error, Result};
use blotter_engine::Table;

/// Longest label drawn under a bar before truncation kicks in.
const MAX_LABEL_CHARS: usize = 24;

/// Categories and counts for the top-ten bar chart.
#[derive(Debug)]
pub struct BarData {
    labels: Vec<String>,
    counts: Vec<i64>,
}

impl BarData {
    /// Shape a (label, count) table. Labels longer than the drawable
    /// width are shortened so rotated text cannot escape the canvas.
    pub fn from_table(table: &Table) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::render("top ten table has no rows to plot"));
        }
        let count_col = table
            .column_index("NumberOfCrimes")
            .map_err(|err| Error::render(err.to_string()))?;

        let mut labels = Vec::with_capacity(table.row_count());
        let mut counts = Vec::with_capacity(table.row_count());
        for row in table.rows() {
            labels.push(shorten(&row[0].to_string()));
            counts.push(row[count_col].as_int().unwrap_or(0));
        }
        Ok(Self { labels, counts })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, idx: usize) -> &str {
        self.labels.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    pub fn max_count(&self) -> i64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

fn shorten(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut cut: String = label.chars().take(MAX_LABEL_CHARS - 2).collect();
    cut.push_str("..");
    cut
}

/// The month report reshaped into a year-by-month grid.
///
/// Columns are the years present in the data, rows the months present
/// in any year, both ascending. Combinations absent from the table
/// render as zero. The zero-count null-date group has no year or month
/// and stays out of the grid.
#[derive(Debug)]
pub struct MonthPivot {
    years: Vec<i64>,
    months: Vec<i64>,
    cells: Vec<Vec<i64>>,
}

impl MonthPivot {
    pub fn from_table(table: &Table) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::render("month table has no rows to plot"));
        }
        let year_col = table
            .column_index("Year")
            .map_err(|err| Error::render(err.to_string()))?;
        let month_col = table
            .column_index("Month")
            .map_err(|err| Error::render(err.to_string()))?;
        let count_col = table
            .column_index("CrimesPerMonth")
            .map_err(|err| Error::render(err.to_string()))?;

        let mut years: Vec<i64> = table
            .rows()
            .iter()
            .filter_map(|row| row[year_col].as_int())
            .collect();
        years.sort_unstable();
        years.dedup();
        let mut months: Vec<i64> = table
            .rows()
            .iter()
            .filter_map(|row| row[month_col].as_int())
            .collect();
        months.sort_unstable();
        months.dedup();
        if years.is_empty() || months.is_empty() {
            return Err(Error::render("month table has no dated rows to plot"));
        }

        let mut cells = vec![vec![0i64; years.len()]; months.len()];
        for row in table.rows() {
            let (Some(year), Some(month)) = (row[year_col].as_int(), row[month_col].as_int())
            else {
                continue;
            };
            let count = row[count_col].as_int().unwrap_or(0);
            let row_idx = months.iter().position(|m| *m == month);
            let col_idx = years.iter().position(|y| *y == year);
            if let (Some(r), Some(c)) = (row_idx, col_idx) {
                cells[r][c] = count;
            }
        }
        Ok(Self {
            years,
            months,
            cells,
        })
    }

    pub fn years(&self) -> &[i64] {
        &self.years
    }

    pub fn months(&self) -> &[i64] {
        &self.months
    }

    /// Count for the grid cell at (month row, year column).
    pub fn cell(&self, month_row: usize, year_col: usize) -> i64 {
        self.cells[month_row][year_col]
    }
}
