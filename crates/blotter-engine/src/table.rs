//! Materialized tables: a schema plus owned rows.

use crate::error::EngineError;
use crate::schema::Schema;
use crate::value::Value;

/// An in-memory table. Every row is arity-checked against the schema on
/// the way in, so downstream code can index columns without bounds
/// anxiety.
#[derive(Debug, Clone)]
pub struct Table {
    schema: Schema,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(schema: Schema, rows: Vec<Vec<Value>>) -> Result<Self, EngineError> {
        let mut table = Self::new(schema);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), EngineError> {
        if row.len() != self.schema.len() {
            return Err(EngineError::RowArity {
                expected: self.schema.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column position by name, as an error rather than an option, since
    /// report queries treat a missing column as a hard fault.
    pub fn column_index(&self, name: &str) -> Result<usize, EngineError> {
        self.schema
            .index_of(name)
            .ok_or_else(|| EngineError::NoSuchColumn(name.to_string()))
    }

    /// Render up to `limit` rows as a bordered, right-aligned text grid
    /// for progress logging.
    pub fn preview(&self, limit: usize) -> String {
        let header: Vec<String> = self
            .schema
            .header()
            .into_iter()
            .map(str::to_string)
            .collect();
        let shown: Vec<Vec<String>> = self
            .rows
            .iter()
            .take(limit)
            .map(|row| row.iter().map(Value::to_string).collect())
            .collect();

        let mut widths: Vec<usize> = header.iter().map(String::len).collect();
        for row in &shown {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        let rule = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("+")
        );
        let render_line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(widths.iter().copied())
                .map(|(cell, width)| format!("{cell:>width$}"))
                .collect();
            format!("|{}|", padded.join("|"))
        };

        let mut out = String::new();
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&render_line(&header));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        for row in &shown {
            out.push_str(&render_line(row));
            out.push('\n');
        }
        out.push_str(&rule);
        if self.rows.len() > limit {
            out.push('\n');
            out.push_str(&format!("only showing top {limit} rows"));
        }
        out
    }
}
