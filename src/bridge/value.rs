// In: src/bridge/value.rs

//! The host language's dynamic value, as seen from the table engine.

use std::fmt;

use crate::types::ColumnType;

/// A missing-value marker that remembers the type of the column it came from,
/// so re-ingesting it rebuilds a column of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingKind {
    Int,
    Float,
    Bool,
    String,
    /// Missing with no known type (e.g. from a `Null`-typed column).
    Generic,
}

impl MissingKind {
    pub fn for_column_type(dtype: ColumnType) -> Self {
        match dtype {
            ColumnType::Int64 => MissingKind::Int,
            ColumnType::Float64 => MissingKind::Float,
            ColumnType::Boolean => MissingKind::Bool,
            ColumnType::String => MissingKind::String,
            ColumnType::Null => MissingKind::Generic,
        }
    }

    /// The column type this marker stands for; `None` for `Generic`.
    pub fn column_type(self) -> Option<ColumnType> {
        match self {
            MissingKind::Int => Some(ColumnType::Int64),
            MissingKind::Float => Some(ColumnType::Float64),
            MissingKind::Bool => Some(ColumnType::Boolean),
            MissingKind::String => Some(ColumnType::String),
            MissingKind::Generic => None,
        }
    }
}

/// A dynamic, row-oriented value.
///
/// `List` and `Record` exist so the bridge can accept and produce the host's
/// container shapes; they are never stored inside a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Missing(MissingKind),
    List(Vec<Value>),
    Record(Vec<(String, Value)>),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing(_))
    }

    /// The column type a present scalar would be stored as.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::Int(_) => Some(ColumnType::Int64),
            Value::Float(_) => Some(ColumnType::Float64),
            Value::Bool(_) => Some(ColumnType::Boolean),
            Value::Str(_) => Some(ColumnType::String),
            Value::Missing(_) | Value::List(_) | Value::Record(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int64",
            Value::Float(_) => "Float64",
            Value::Bool(_) => "Boolean",
            Value::Str(_) => "String",
            Value::Missing(_) => "Missing",
            Value::List(_) => "List",
            Value::Record(_) => "Record",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Missing(_) => write!(f, "NA"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Record(fields) => {
                write!(f, "{{")?;
                for (i, (name, item)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}
