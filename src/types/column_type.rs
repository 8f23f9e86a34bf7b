//! This module defines the canonical, type-safe tag carried by every column.

use crate::error::StrataError;
use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The logical type of a column.
///
/// Every chunk of a column shares this tag. `Null` is the type of a column
/// built from values that were all missing and carried no type of their own.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnType {
    Int64,
    Float64,
    Boolean,
    String,
    Null,
}

impl ColumnType {
    /// Converts an Arrow `DataType` into a `ColumnType`.
    ///
    /// Only the five physical layouts the engine stores are accepted; wider
    /// Arrow types must be cast by the caller first.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, StrataError> {
        match arrow_type {
            ArrowDataType::Int64 => Ok(Self::Int64),
            ArrowDataType::Float64 => Ok(Self::Float64),
            ArrowDataType::Boolean => Ok(Self::Boolean),
            ArrowDataType::Utf8 => Ok(Self::String),
            ArrowDataType::Null => Ok(Self::Null),
            dt => Err(StrataError::UnsupportedType(format!(
                "Cannot store Arrow type {:?} in a column",
                dt
            ))),
        }
    }

    /// Converts a `ColumnType` back into an Arrow `DataType`.
    pub fn to_arrow_type(&self) -> ArrowDataType {
        match self {
            Self::Int64 => ArrowDataType::Int64,
            Self::Float64 => ArrowDataType::Float64,
            Self::Boolean => ArrowDataType::Boolean,
            Self::String => ArrowDataType::Utf8,
            Self::Null => ArrowDataType::Null,
        }
    }

    /// Returns `true` for the types scalar arithmetic and sum/mean accept.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }
}

/// Provides the canonical string representation for a `ColumnType`.
impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These names are part of the error messages the host runtime sees.
        write!(f, "{:?}", self)
    }
}
