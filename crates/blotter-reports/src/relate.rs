//! Small relational helpers shared by the queries.

use blotter_engine::{EngineError, Table, Value};
use std::collections::HashMap;

/// Index a dimension table as key value to description value.
///
/// Rows whose key is null are skipped, so a lookup through this index
/// behaves as an inner join: null and dangling foreign keys simply miss.
pub(crate) fn index_by<'a>(
    table: &'a Table,
    key: &str,
    desc: &str,
) -> Result<HashMap<&'a Value, &'a Value>, EngineError> {
    let key_col = table.column_index(key)?;
    let desc_col = table.column_index(desc)?;
    let mut index = HashMap::with_capacity(table.row_count());
    for row in table.rows() {
        if row[key_col].is_null() {
            continue;
        }
        index.insert(&row[key_col], &row[desc_col]);
    }
    Ok(index)
}
