//! Chart rendering for the crime-blotter pipeline.
//!
//! Two images per run: a bar chart of the top ten crime types and a
//! year-by-month pivot table of case counts. Rendering is best-effort;
//! a failure here is reported as a recoverable `Render` error and never
//! blocks CSV export.

mod chart;
mod shape;

pub use chart::{render_month_pivot, render_top_ten_chart};
pub use shape::{BarData, MonthPivot};
