//! Ingestion for the crime-blotter pipeline.
//!
//! - `registry` pins down the seven extracts: file name, table name, and
//!   column types, in load order.
//! - `loader` reads one extract through the registry schema and registers
//!   the typed table in the engine session, failing the run on the first
//!   malformed row.

pub mod loader;
pub mod registry;

pub use loader::{load_all, load_dataset};
pub use registry::{datasets, DatasetDef, DELIMITER};
