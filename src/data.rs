//! In-memory dataset bound to chart axes.
//!
//! A simple columnar data structure standing in for the host platform's
//! dataset: typed columns plus a mapping from axis names to columns. It
//! implements the accessor traits the renderer consumes.

use crate::host::{AxesAccessor, AxisAccessor, DatasetAccessor};
use crate::scale::extent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text.
    Text,
    /// Dates (kept as their source text).
    Date,
    /// Numbers.
    Number,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
        })
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A date value, as written in the source data.
    Date(String),
    /// A missing value.
    Missing,
}

impl Value {
    /// Get as f64, or None if not a finite number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// True for [`Value::Missing`].
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Identity used by categorical scales; `None` for missing values.
    #[must_use]
    pub fn key(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            other => Some(other.to_string()),
        }
    }

    fn coerce(self, ty: ColumnType) -> Self {
        match (ty, self) {
            (ColumnType::Number, Self::Text(s) | Self::Date(s)) => {
                s.trim().parse::<f64>().map_or(Self::Missing, Self::Number)
            }
            (ColumnType::Date, Self::Text(s)) => Self::Date(s),
            (ColumnType::Text, Self::Date(s)) => Self::Text(s),
            (_, value) => value,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) | Self::Date(s) => f.write_str(s),
            Self::Missing => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    values: Vec<Value>,
}

impl Column {
    /// Create a column, normalizing values to its type.
    ///
    /// Text in a number column is parsed; anything unparseable becomes
    /// [`Value::Missing`].
    #[must_use]
    pub fn new(name: &str, column_type: ColumnType, values: Vec<Value>) -> Self {
        let values = values.into_iter().map(|v| v.coerce(column_type)).collect();
        Self {
            name: name.to_string(),
            column_type,
            values,
        }
    }

    /// Create a number column.
    #[must_use]
    pub fn numbers(name: &str, data: &[f64]) -> Self {
        Self::new(name, ColumnType::Number, data.iter().map(|&v| Value::Number(v)).collect())
    }

    /// Create a text column.
    #[must_use]
    pub fn texts(name: &str, data: &[&str]) -> Self {
        Self::new(name, ColumnType::Text, data.iter().map(|&s| Value::from(s)).collect())
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AxisAccessor for Column {
    fn column_type(&self) -> ColumnType {
        self.column_type
    }

    fn range(&self) -> Option<(f64, f64)> {
        match self.column_type {
            ColumnType::Number => extent(self.values.iter().filter_map(Value::as_number)),
            ColumnType::Text | ColumnType::Date => None,
        }
    }

    fn val(&self, row: usize) -> Value {
        self.values.get(row).cloned().unwrap_or(Value::Missing)
    }
}

/// Columns plus axis bindings.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    bindings: HashMap<String, usize>,
}

impl Dataset {
    /// Create a new empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column (builder style).
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    /// Bind an axis to a column by name (builder style).
    ///
    /// Unknown column names leave the axis unbound.
    #[must_use]
    pub fn bind(mut self, axis: &str, column: &str) -> Self {
        self.bind_axis(axis, column);
        self
    }

    /// Add a column, replacing any column of the same name.
    pub fn add_column(&mut self, column: Column) {
        match self.columns.iter().position(|c| c.name == column.name) {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }
    }

    /// Bind an axis to a column by name. Returns false if no such column exists.
    pub fn bind_axis(&mut self, axis: &str, column: &str) -> bool {
        match self.columns.iter().position(|c| c.name == column) {
            Some(index) => {
                self.bindings.insert(axis.to_string(), index);
                true
            }
            None => false,
        }
    }

    /// Get a column by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column bound to an axis.
    #[must_use]
    pub fn bound(&self, axis: &str) -> Option<&Column> {
        self.bindings.get(axis).map(|&index| &self.columns[index])
    }

    /// Number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }
}

impl DatasetAccessor for Dataset {
    fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }
}

impl AxesAccessor for Dataset {
    fn axis(&self, name: &str) -> Option<&dyn AxisAccessor> {
        self.bound(name).map(|c| c as &dyn AxisAccessor)
    }
}
