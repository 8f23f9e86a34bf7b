//! This module defines the shared traits that link Rust native types to the
//! column types they are stored as.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::buffer::{BooleanBuffer, NullBuffer, ScalarBuffer};

use crate::error::StrataError;
use crate::types::ColumnType;

/// A Rust value type that a column can be built from and read back into.
pub trait NativeValue: Sized + Clone {
    /// The column type this native maps to.
    const COLUMN_TYPE: ColumnType;

    /// Builds one Arrow chunk from dense values and an optional validity bitmap.
    ///
    /// The caller guarantees `nulls`, when present, has `values.len()` slots.
    fn build_chunk(values: Vec<Self>, nulls: Option<NullBuffer>) -> Result<ArrayRef, StrataError>;

    /// Reads slot `index` of `array`, ignoring validity.
    /// Returns `None` if `array` is not of this native's physical layout.
    fn read(array: &dyn Array, index: usize) -> Option<Self>;
}

/// A fixed-width numeric native whose chunk storage can be lent out directly.
pub trait ExportNative: NativeValue + bytemuck::Pod {
    /// The dense value buffer of `array`, including the slots under nulls.
    fn dense_values(array: &dyn Array) -> Option<&[Self]>;
}

// Implement the traits for the fixed-width primitive natives.
macro_rules! impl_primitive_native {
    ($T:ty, $Array:ty, $Variant:ident) => {
        impl NativeValue for $T {
            const COLUMN_TYPE: ColumnType = ColumnType::$Variant;

            fn build_chunk(
                values: Vec<Self>,
                nulls: Option<NullBuffer>,
            ) -> Result<ArrayRef, StrataError> {
                let array = <$Array>::try_new(ScalarBuffer::from(values), nulls)?;
                Ok(Arc::new(array))
            }

            fn read(array: &dyn Array, index: usize) -> Option<Self> {
                array
                    .as_any()
                    .downcast_ref::<$Array>()
                    .map(|a| a.value(index))
            }
        }

        impl ExportNative for $T {
            fn dense_values(array: &dyn Array) -> Option<&[Self]> {
                array
                    .as_any()
                    .downcast_ref::<$Array>()
                    .map(|a| &**a.values())
            }
        }
    };
}

impl_primitive_native!(i64, Int64Array, Int64);
impl_primitive_native!(f64, Float64Array, Float64);

impl NativeValue for bool {
    const COLUMN_TYPE: ColumnType = ColumnType::Boolean;

    fn build_chunk(values: Vec<Self>, nulls: Option<NullBuffer>) -> Result<ArrayRef, StrataError> {
        let buffer = BooleanBuffer::collect_bool(values.len(), |i| values[i]);
        Ok(Arc::new(BooleanArray::new(buffer, nulls)))
    }

    fn read(array: &dyn Array, index: usize) -> Option<Self> {
        array
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|a| a.value(index))
    }
}

impl NativeValue for String {
    const COLUMN_TYPE: ColumnType = ColumnType::String;

    fn build_chunk(values: Vec<Self>, nulls: Option<NullBuffer>) -> Result<ArrayRef, StrataError> {
        let array: StringArray = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let valid = nulls.as_ref().map_or(true, |n| n.is_valid(i));
                valid.then_some(v.as_str())
            })
            .collect();
        Ok(Arc::new(array))
    }

    fn read(array: &dyn Array, index: usize) -> Option<Self> {
        array
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(index).to_string())
    }
}
