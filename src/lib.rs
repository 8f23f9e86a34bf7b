//! This file is the root of the `strata` crate, the columnar table engine.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`column`, `table`,
//!     `kernels`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of types and functions a host needs, so that
//!     `use strata::{Table, Column, ...}` is enough for everyday use.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

#[doc(hidden)]
pub use log as __log;

pub mod bridge;
pub mod column;
pub mod config;
pub mod error;
pub mod export;
pub mod grouping;
pub mod kernels;
pub mod null_handling;
pub mod table;
pub mod traits;
pub mod types;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use bridge::{from_columns, row_as_record, to_columns, MissingKind, Value};
pub use column::Column;
pub use config::{EngineConfig, ExportPolicy};
pub use error::{ErrorKind, Result, StrataError};
pub use export::{buffer_view, BufferView};
pub use grouping::{group_by, Grouping};
pub use observability::enable_verbose_logging;
pub use table::Table;
pub use types::ColumnType;
