//! Blotter shared types.
//!
//! This crate provides the foundations shared across the pipeline crates:
//! - The stage-coded error taxonomy driving terminal-vs-recoverable handling
//! - Report identity: logical report names, canonical export filenames, and
//!   the ordered header-keyword classification table

pub mod error;
pub mod report;
pub mod tables;

pub use error::{Error, Result};
pub use report::ReportKind;
