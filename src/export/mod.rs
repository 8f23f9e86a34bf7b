// In: src/export/mod.rs

//! Zero-copy export of numeric columns.
//!
//! A [`BufferView`] borrows the dense value buffer of a single-chunk Int64 or
//! Float64 column. The borrow is tied to the source column (and so to the table
//! holding it) by the `'a` lifetime, so the view cannot outlive its storage.
//! Slots under a null carry unspecified values; consult [`BufferView::validity`].

use std::borrow::Cow;

use arrow::array::Array;
use arrow::buffer::NullBuffer;
use ndarray::{Array1, ArrayView1};

use crate::column::Column;
use crate::config::{EngineConfig, ExportPolicy};
use crate::error::{Result, StrataError};
use crate::traits::ExportNative;

#[derive(Debug, Clone)]
pub struct BufferView<'a, T: ExportNative> {
    values: Cow<'a, [T]>,
    validity: Option<NullBuffer>,
}

impl<'a, T: ExportNative> BufferView<'a, T> {
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_array_view(&self) -> ArrayView1<'_, T> {
        ArrayView1::from(self.as_slice())
    }

    /// The raw little-endian bytes of the value buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    pub fn as_ptr(&self) -> *const T {
        self.values.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The null bitmap, or `None` when every slot is valid.
    pub fn validity(&self) -> Option<&NullBuffer> {
        self.validity.as_ref()
    }

    /// `false` only when a fragmented column was copied under `CopyFragmented`.
    pub fn is_zero_copy(&self) -> bool {
        matches!(self.values, Cow::Borrowed(_))
    }
}

fn check_type<T: ExportNative>(column: &Column) -> Result<()> {
    if column.dtype() != T::COLUMN_TYPE {
        return Err(StrataError::type_mismatch(
            "buffer export",
            T::COLUMN_TYPE,
            column.dtype(),
        ));
    }
    Ok(())
}

fn dense_values<T: ExportNative>(array: &dyn Array) -> Result<&[T]> {
    T::dense_values(array).ok_or_else(|| {
        StrataError::InternalError(format!(
            "chunk of type {:?} has no {} buffer",
            array.data_type(),
            T::COLUMN_TYPE
        ))
    })
}

/// Borrows the value buffer of a single-chunk numeric column.
///
/// # Errors
/// `TypeMismatch` if `T` does not match the column type, `NonContiguous`
/// if the column has more than one chunk.
pub fn buffer_view<T: ExportNative>(column: &Column) -> Result<BufferView<'_, T>> {
    buffer_view_with_policy(column, &EngineConfig::default())
}

/// Like [`buffer_view`], but a multi-chunk column is copied into an owned
/// buffer when `config.export_policy` is `CopyFragmented`.
pub fn buffer_view_with_policy<'a, T: ExportNative>(
    column: &'a Column,
    config: &EngineConfig,
) -> Result<BufferView<'a, T>> {
    check_type::<T>(column)?;
    match column.chunks() {
        [] => Ok(BufferView {
            values: Cow::Borrowed(&[]),
            validity: None,
        }),
        [chunk] => Ok(BufferView {
            values: Cow::Borrowed(dense_values(chunk.as_ref())?),
            validity: chunk.nulls().cloned(),
        }),
        chunks => match config.export_policy {
            ExportPolicy::Strict => Err(StrataError::NonContiguous {
                chunks: chunks.len(),
            }),
            ExportPolicy::CopyFragmented => {
                let array = column.contiguous()?;
                log_metric!("event" = "export_copy", "chunks" = chunks.len(), "rows" = array.len());
                Ok(BufferView {
                    values: Cow::Owned(dense_values::<T>(array.as_ref())?.to_vec()),
                    validity: array.nulls().cloned(),
                })
            }
        },
    }
}

/// Copies a numeric column of any chunking into an owned `Array1`.
pub fn to_owned_array<T: ExportNative>(column: &Column) -> Result<(Array1<T>, Option<NullBuffer>)> {
    check_type::<T>(column)?;
    let array = column.contiguous()?;
    let values = dense_values::<T>(array.as_ref())?.to_vec();
    Ok((Array1::from_vec(values), array.nulls().cloned()))
}
