//! Field typing and row coercion.

use crate::error::EngineError;
use crate::value::Value;
use chrono::NaiveDate;
use std::fmt;

/// Calendar dates in the extracts are ISO formatted.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Declared type of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Text,
    Date,
}

impl FieldType {
    /// Parse one raw cell into a typed value.
    ///
    /// The empty cell is `Null` for every type; anything else must parse
    /// as the declared type or the whole load fails.
    pub fn coerce(self, field: &str, raw: &str) -> Result<Value, EngineError> {
        if raw.is_empty() {
            return Ok(Value::Null);
        }
        match self {
            FieldType::Text => Ok(Value::Text(raw.to_string())),
            FieldType::Integer => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| self.coerce_error(field, raw)),
            FieldType::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|_| self.coerce_error(field, raw)),
        }
    }

    fn coerce_error(self, field: &str, raw: &str) -> EngineError {
        EngineError::Coerce {
            field: field.to_string(),
            ty: self.name(),
            value: raw.to_string(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Text => "text",
            FieldType::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named, typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> FieldType {
        self.ty
    }
}

/// Ordered set of fields describing a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of a column by exact name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Column names in declaration order, as the CSV writer emits them.
    pub fn header(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }

    /// Coerce one raw record into a typed row, failing on the first bad
    /// cell. Arity is checked before any parsing happens.
    pub fn coerce_row(&self, raw: &[&str]) -> Result<Vec<Value>, EngineError> {
        if raw.len() != self.fields.len() {
            return Err(EngineError::RowArity {
                expected: self.fields.len(),
                actual: raw.len(),
            });
        }
        self.fields
            .iter()
            .zip(raw)
            .map(|(field, cell)| field.ty().coerce(field.name(), cell))
            .collect()
    }
}
