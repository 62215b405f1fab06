//! In-memory relational engine for the crime-blotter pipeline.
//!
//! The engine owns the typed data model and the two effectful edges of a
//! run:
//!
//! - `Value`, `FieldType`, `Field`, `Schema`, `Table` describe and hold
//!   typed rows loaded from the extracts.
//! - `Session` is the resource handle a run opens before touching any
//!   table and closes (or drops) when it is done.
//! - `writer` materializes a table as a CSV directory with a part file,
//!   a `_SUCCESS` completion marker, and checksum sidecars.
//!
//! Aggregation itself lives upstream in `blotter-reports`; this crate
//! deliberately knows nothing about the five report queries.

pub mod error;
pub mod schema;
pub mod session;
pub mod table;
pub mod value;
pub mod writer;

pub use error::EngineError;
pub use schema::{Field, FieldType, Schema};
pub use session::{RunId, Session};
pub use table::Table;
pub use value::Value;
pub use writer::{crc_sidecar_name, write_csv_dir, CRC_SUFFIX, SUCCESS_MARKER};
