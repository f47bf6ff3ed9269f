//! Table and cell data structures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::schema::{CellType, Column};

/// A cell value with type information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            CellValue::Null => state.write_u8(0),
            CellValue::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            // Int and Float hash through the same numeric path so that
            // Int(5) and Float(5.0), which compare equal, land in the
            // same bucket during duplicate detection.
            CellValue::Int(i) => {
                state.write_u8(2);
                numeric_bits(*i as f64).hash(state);
            }
            CellValue::Float(f) => {
                state.write_u8(2);
                numeric_bits(*f).hash(state);
            }
            CellValue::String(s) => {
                state.write_u8(3);
                s.hash(state);
            }
            CellValue::Date(d) => {
                state.write_u8(4);
                d.hash(state);
            }
            CellValue::DateTime(dt) => {
                state.write_u8(5);
                dt.hash(state);
            }
        }
    }
}

/// Canonical bit pattern for hashing floats: -0.0 folds into 0.0 and
/// every NaN folds into one representative, matching equality.
fn numeric_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The numeric content of this cell, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The type this cell contributes to column inference
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Date(d) => Cow::Owned(d.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// An ordered columnar table with a uniform row length
#[derive(Debug, Clone)]
pub struct Table {
    /// Column definitions, in display order
    pub columns: Vec<Column>,
    /// Rows in source order; every row has `columns.len()` cells
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row, padding short rows with nulls and truncating long ones
    /// so the row length stays uniform
    pub fn add_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Null);
        self.rows.push(cells);
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The first `n` rows, for previews
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Columns whose inferred type is numeric (Int or Float).
    /// A charting caller picks its series from these.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.inferred_type.is_numeric())
            .collect()
    }

    /// Re-derive every column's inferred type from the current cells
    pub fn infer_column_types(&mut self) {
        for (col_idx, col) in self.columns.iter_mut().enumerate() {
            let mut inferred = CellType::Null;
            for row in &self.rows {
                inferred = inferred.widen(row[col_idx].cell_type());
            }
            col.inferred_type = inferred;
        }
    }

    /// Keep only the named columns, in the given order. Every name is
    /// validated before any mutation, so a failed call leaves the table
    /// untouched.
    pub fn select_columns(&mut self, names: &[String]) -> crate::error::Result<()> {
        let indices: Vec<usize> = names
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| crate::error::SweepError::UnknownColumn(name.clone()))
            })
            .collect::<crate::error::Result<_>>()?;

        self.columns = indices
            .iter()
            .enumerate()
            .map(|(new_idx, &old_idx)| {
                let col = &self.columns[old_idx];
                Column::with_type(col.name.clone(), new_idx, col.inferred_type)
            })
            .collect();

        for row in &mut self.rows {
            *row = indices.iter().map(|&i| row[i].clone()).collect();
        }

        Ok(())
    }
}
