//! The five report queries.
//!
//! Each query is a pure function from the registered input tables to one
//! result table with a fixed header; `run_all` executes them in report
//! order and is the only place that logs. Joins are inner joins against
//! the dimension tables, so cases with null or dangling foreign keys
//! drop out of the affected report. That is long-standing behavior the
//! downstream consumers rely on, not something to repair here.

mod relate;

pub mod queries;

pub use queries::{
    case_status_per_crime, compute, crimes_per_area, crimes_per_descent_sex_age, crimes_per_month,
    run_all, top_ten_crime_types,
};
