//! This module serves as the public API for all null-handling logic within the
//! strata core.
//!
//! Nulls are always structural: a column keeps its dense value buffer and an
//! Arrow `NullBuffer` beside it, never a sentinel value inside the data. The
//! helpers here convert between the shapes callers hand us (null positions,
//! `Option` vectors) and that layout.
//!
//! This module is PURE RUST and knows nothing about tables or the value bridge.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Kernels for building and inspecting Arrow-compatible validity bitmaps.
pub mod bitmap;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use bitmap::{null_buffer_from_positions, split_options};

//==================================================================================
// 3. Unit Tests (Module-level integration tests)
//==================================================================================

#[cfg(test)]
mod bitmap_tests;
