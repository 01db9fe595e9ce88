// Tuple and Value Types
//
// This module defines the row representation used throughout the executor,
// along with the error types for query execution.

use std::fmt;

use linked_hash_map::LinkedHashMap;
use serde;
use thiserror::Error;

/// A dynamically typed scalar held by a tuple field.
///
/// Values of different kinds never compare equal; there is no numeric
/// coercion between `Integer` and `Float`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Kind label used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// One result row: a mapping from field name to value.
///
/// Field names are unique per tuple. Insertion order is preserved for
/// display purposes only; equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct Tuple {
    values: LinkedHashMap<String, FieldValue>,
}

impl Tuple {
    /// Create a new empty tuple.
    pub fn new() -> Self {
        Tuple {
            values: LinkedHashMap::new(),
        }
    }

    /// Get a value by field name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Set a value for a field, replacing any previous value.
    pub fn set(&mut self, field: String, value: FieldValue) {
        self.values.insert(field, value);
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Field name / value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        // Two tuples are equal if they hold the same fields with the same
        // values, regardless of insertion order.
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .all(|(field, value)| other.values.get(field) == Some(value))
    }
}

impl FromIterator<(String, FieldValue)> for Tuple {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Tuple {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (field, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field, value)?;
        }
        write!(f, "}}")
    }
}

/// Represents query execution error
#[derive(Error, Debug)]
pub enum QueryError {
    /// Error during query execution
    #[error("Execution error: {0}")]
    ExecutionError(String),
    /// Error in data typing, e.g. a sort field with inconsistent kinds
    #[error("Type error: {0}")]
    TypeError(String),
    /// Field required by an operator is absent from a tuple
    #[error("Field not found: {0}")]
    FieldNotFound(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
