// In: src/error.rs

//! This module defines the single, unified error type for the entire strata library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every kernel returns `Result<_, StrataError>`; nothing on an expected failure
//! path panics. The calling interpreter turns these into user-facing messages,
//! typically by switching on [`StrataError::kind`].

use thiserror::Error;

use crate::types::ColumnType;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StrataError>;

/// The coarse error taxonomy exposed to the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Referenced column name(s) not found, or a schema conflict.
    Schema,
    /// The operation needs a different column or value type.
    TypeMismatch,
    /// Mismatched lengths or out-of-range positions.
    Shape,
    /// Structurally required arguments are missing or empty.
    Arity,
    /// A failure surfaced by an underlying library or the OS, always wrapped.
    FfiInterop,
    /// A broken internal invariant (this is a bug).
    Internal,
}

#[derive(Error, Debug)]
pub enum StrataError {
    // =========================================================================
    // === Schema Errors
    // =========================================================================
    /// Carries every missing name when a batch of names was validated.
    #[error("Column(s) not found: {}", .missing.join(", "))]
    ColumnNotFound { missing: Vec<String> },

    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),

    // =========================================================================
    // === Type Errors
    // =========================================================================
    #[error("Type mismatch in {context}: expected {expected}, got {actual}")]
    TypeMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    // =========================================================================
    // === Shape Errors
    // =========================================================================
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Cell {index} is null; check is_null before reading it")]
    NullAccess { index: usize },

    #[error("Column spans {chunks} chunks; a contiguous view needs exactly one")]
    NonContiguous { chunks: usize },

    // =========================================================================
    // === Arity Errors
    // =========================================================================
    #[error("Missing required argument: {0}")]
    Arity(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error originating from the underlying I/O subsystem (e.g. opening a log file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library while parsing an `EngineConfig`.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),
}

impl StrataError {
    /// Shorthand for the single-name `ColumnNotFound` case.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        StrataError::ColumnNotFound {
            missing: vec![name.into()],
        }
    }

    pub fn type_mismatch(
        context: impl Into<String>,
        expected: impl ToString,
        actual: ColumnType,
    ) -> Self {
        StrataError::TypeMismatch {
            context: context.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Maps a concrete error onto the host-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StrataError::ColumnNotFound { .. } | StrataError::DuplicateColumn(_) => {
                ErrorKind::Schema
            }
            StrataError::TypeMismatch { .. } | StrataError::UnsupportedType(_) => {
                ErrorKind::TypeMismatch
            }
            StrataError::ShapeMismatch(_)
            | StrataError::IndexOutOfBounds { .. }
            | StrataError::NullAccess { .. }
            | StrataError::NonContiguous { .. } => ErrorKind::Shape,
            StrataError::Arity(_) => ErrorKind::Arity,
            StrataError::Arrow(_) | StrataError::Io(_) | StrataError::Config(_) => {
                ErrorKind::FfiInterop
            }
            StrataError::InternalError(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_lists_every_name() {
        let err = StrataError::ColumnNotFound {
            missing: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "Column(s) not found: a, b");
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_arrow_errors_are_wrapped_as_interop() {
        let err: StrataError =
            arrow::error::ArrowError::ComputeError("boom".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::FfiInterop);
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = StrataError::type_mismatch("scalar_op", "numeric", ColumnType::String);
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            err.to_string(),
            "Type mismatch in scalar_op: expected numeric, got String"
        );
    }
}
