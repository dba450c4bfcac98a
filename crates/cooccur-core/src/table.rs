//! Tabular input types: dynamically-typed cells and the record table.
//!
//! Identifiers in order exports are opaque (numeric in some shops,
//! alphanumeric in others), so cells carry their inferred type instead of
//! being forced into one. The zero-product exclusion in the normalizer is
//! type-sensitive: it fires on numeric zero only, never on the string
//! `"0"`.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// A dynamically-typed table cell.
#[derive(Debug, Clone)]
pub enum Value {
    /// Missing / empty cell.
    Null,
    /// Integer cell.
    Int(i64),
    /// Floating-point cell.
    Float(f64),
    /// String cell.
    Str(String),
}

impl Value {
    /// Returns `true` for the missing-cell marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` when the cell holds the *numeric* value zero.
    ///
    /// `Str("0")` is not numeric zero. Callers relying on that distinction
    /// should keep it that way: the original export pipeline only ever
    /// excluded exact numeric zero.
    #[must_use]
    pub fn is_numeric_zero(&self) -> bool {
        match self {
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Null | Value::Str(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

// Values are used as grouping and join keys. Comparison is strict per
// variant: Int(1) and Float(1.0) are distinct keys, floats compare by
// bit pattern so the Eq/Hash contract holds.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Int(i) => {
                state.write_u8(1);
                i.hash(state);
            }
            Value::Float(f) => {
                state.write_u8(2);
                f.to_bits().hash(state);
            }
            Value::Str(s) => {
                state.write_u8(3);
                s.hash(state);
            }
        }
    }
}

/// The tabular input contract: named columns plus rows of [`Value`] cells.
///
/// Column order is arbitrary; the normalizer resolves the columns it needs
/// by name. The table is append-only and never mutated by the pipeline.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RecordTable {
    /// Creates an empty table with the given column names.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row. The cell count must match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RowShape {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names, in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolves the given column names to positions, collecting *all*
    /// missing names into one [`Error::Schema`] so the caller sees the
    /// complete list at once.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => indices.push(idx),
                None => missing.push((*name).to_string()),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(Error::Schema { missing })
        }
    }
}
