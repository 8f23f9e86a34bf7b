//! This module serves as the public API for the collection of pure, stateless
//! table kernels.
//!
//! Every kernel consumes a `&Table` and returns a brand new `Table`; none of
//! them mutates its input. Columns a kernel does not transform are shared with
//! the output by reference (their chunks are `Arc`s), so project and the
//! untouched columns of `scalar_op` cost no row copies.

use arrow::array::Array;

use crate::error::StrataError;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Column selection and reordering.
pub mod project;

/// Row selection by boolean mask.
pub mod filter;

/// Index-permutation sorting and row gathering.
pub mod sort;

/// Element-wise arithmetic against a scalar, with Float64 promotion.
pub mod arithmetic;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use arithmetic::{
    scalar_add, scalar_divide, scalar_multiply, scalar_op, scalar_op_column, scalar_subtract,
    ArithmeticOp,
};
pub use filter::{filter, filter_by_bools};
pub use project::project;
pub use sort::{sort_by_column, sort_by_indices, sort_indices};

//==================================================================================
// 3. Shared Helpers
//==================================================================================

/// Downcasts a chunk to its concrete Arrow array type.
///
/// Columns validate chunk types at construction, so a failure here is a bug.
pub(crate) fn downcast_chunk<'a, A: Array + 'static>(
    chunk: &'a dyn Array,
) -> Result<&'a A, StrataError> {
    chunk.as_any().downcast_ref::<A>().ok_or_else(|| {
        StrataError::InternalError(format!(
            "chunk of type {:?} is not a {}",
            chunk.data_type(),
            std::any::type_name::<A>()
        ))
    })
}
