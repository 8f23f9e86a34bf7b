//! This module defines the core, strongly-typed data representations used
//! throughout the table engine.
//!
//! It currently includes the canonical `ColumnType` tag which every column
//! carries, and its mapping onto Arrow's physical `DataType`.

pub mod column_type;

// Re-export the main type(s) for easier access.
pub use column_type::ColumnType;
