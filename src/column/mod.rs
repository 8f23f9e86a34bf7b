// In: src/column/mod.rs

//! The Column Store: an immutable, typed, nullable, chunked sequence of values.
//!
//! A column is a list of Arrow arrays ("chunks") that all share one
//! [`ColumnType`]. Chunks are reference-counted, so cloning a column, projecting
//! it into another table or appending it to another column never copies row
//! data. A prefix-offset index maps a logical row to `(chunk, offset)`.

use std::sync::Arc;

use arrow::array::{new_empty_array, Array, ArrayRef, NullArray};

use crate::error::{Result, StrataError};
use crate::null_handling::{null_buffer_from_positions, split_options};
use crate::traits::NativeValue;
use crate::types::ColumnType;

#[derive(Debug, Clone)]
pub struct Column {
    dtype: ColumnType,
    chunks: Vec<ArrayRef>,
    /// `offsets[i]` is the first logical row of chunk `i`; the last entry is the length.
    offsets: Vec<usize>,
}

impl Column {
    //==============================================================================
    // 1. Construction
    //==============================================================================

    /// Builds a column from pre-made chunks, validating every chunk's type.
    pub fn try_from_chunks(dtype: ColumnType, chunks: Vec<ArrayRef>) -> Result<Self> {
        let expected = dtype.to_arrow_type();
        for chunk in &chunks {
            if chunk.data_type() != &expected {
                return Err(StrataError::TypeMismatch {
                    context: "column chunk".to_string(),
                    expected: dtype.to_string(),
                    actual: format!("{:?}", chunk.data_type()),
                });
            }
        }
        Ok(Self::from_validated_chunks(dtype, chunks))
    }

    fn from_validated_chunks(dtype: ColumnType, chunks: Vec<ArrayRef>) -> Self {
        let mut offsets = Vec::with_capacity(chunks.len() + 1);
        let mut running = 0;
        offsets.push(running);
        for chunk in &chunks {
            running += chunk.len();
            offsets.push(running);
        }
        Self {
            dtype,
            chunks,
            offsets,
        }
    }

    /// Wraps a single existing Arrow array as a one-chunk column.
    pub fn from_array(array: ArrayRef) -> Result<Self> {
        let dtype = ColumnType::from_arrow_type(array.data_type())?;
        Ok(Self::from_validated_chunks(dtype, vec![array]))
    }

    /// A zero-length column of the given type.
    pub fn empty(dtype: ColumnType) -> Self {
        Self::from_validated_chunks(dtype, Vec::new())
    }

    /// A `Null`-typed column of `len` missing values.
    pub fn nulls(len: usize) -> Self {
        Self::from_validated_chunks(ColumnType::Null, vec![Arc::new(NullArray::new(len))])
    }

    /// Builds a column from a dense value array plus the positions that are null.
    ///
    /// The values at null positions are kept in the buffer but never read back.
    pub fn from_values<T: NativeValue>(values: Vec<T>, null_positions: &[usize]) -> Result<Self> {
        let nulls = null_buffer_from_positions(values.len(), null_positions)?;
        let chunk = T::build_chunk(values, nulls)?;
        Ok(Self::from_validated_chunks(T::COLUMN_TYPE, vec![chunk]))
    }

    /// Builds a column from optional values; `None` becomes a null cell.
    pub fn from_options<T: NativeValue + Default>(values: Vec<Option<T>>) -> Result<Self> {
        let (dense, nulls) = split_options(values);
        let chunk = T::build_chunk(dense, nulls)?;
        Ok(Self::from_validated_chunks(T::COLUMN_TYPE, vec![chunk]))
    }

    //==============================================================================
    // 2. Inspection
    //==============================================================================

    pub fn dtype(&self) -> ColumnType {
        self.dtype
    }

    /// Logical length: the sum of the chunk lengths.
    pub fn len(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[ArrayRef] {
        &self.chunks
    }

    pub fn null_count(&self) -> usize {
        // `NullArray` reports no physical nulls, but every slot is logically missing.
        if self.dtype == ColumnType::Null {
            return self.len();
        }
        self.chunks.iter().map(|c| c.null_count()).sum()
    }

    /// Maps a logical row onto `(chunk index, offset within chunk)`.
    pub fn locate(&self, index: usize) -> Result<(usize, usize)> {
        if index >= self.len() {
            return Err(StrataError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        let chunk_idx = self.offsets.partition_point(|&start| start <= index) - 1;
        Ok((chunk_idx, index - self.offsets[chunk_idx]))
    }

    pub fn is_null(&self, index: usize) -> Result<bool> {
        let (chunk_idx, offset) = self.locate(index)?;
        if self.dtype == ColumnType::Null {
            return Ok(true);
        }
        Ok(self.chunks[chunk_idx].is_null(offset))
    }

    /// Reads the typed value at `index`.
    ///
    /// # Errors
    /// `TypeMismatch` if `T` is not this column's type, `NullAccess` if the
    /// cell is null, `IndexOutOfBounds` past the end.
    pub fn get<T: NativeValue>(&self, index: usize) -> Result<T> {
        if T::COLUMN_TYPE != self.dtype {
            return Err(StrataError::type_mismatch("column read", T::COLUMN_TYPE, self.dtype));
        }
        let (chunk_idx, offset) = self.locate(index)?;
        let chunk = &self.chunks[chunk_idx];
        if chunk.is_null(offset) {
            return Err(StrataError::NullAccess { index });
        }
        T::read(chunk.as_ref(), offset).ok_or_else(|| {
            StrataError::InternalError(format!(
                "chunk {} does not hold {} data",
                chunk_idx, self.dtype
            ))
        })
    }

    /// Materializes the whole column as typed optional values.
    pub fn to_vec<T: NativeValue>(&self) -> Result<Vec<Option<T>>> {
        if T::COLUMN_TYPE != self.dtype {
            return Err(StrataError::type_mismatch("column read", T::COLUMN_TYPE, self.dtype));
        }
        let mut out = Vec::with_capacity(self.len());
        for chunk in &self.chunks {
            for i in 0..chunk.len() {
                if chunk.is_null(i) {
                    out.push(None);
                } else {
                    let value = T::read(chunk.as_ref(), i).ok_or_else(|| {
                        StrataError::InternalError(format!("chunk does not hold {} data", self.dtype))
                    })?;
                    out.push(Some(value));
                }
            }
        }
        Ok(out)
    }

    //==============================================================================
    // 3. Chunk Management
    //==============================================================================

    /// Returns a new column whose chunks are this column's followed by `other`'s.
    ///
    /// Existing chunks are shared, not copied, and never reordered.
    pub fn append(&self, other: &Column) -> Result<Column> {
        if other.dtype != self.dtype {
            return Err(StrataError::type_mismatch("chunk append", self.dtype, other.dtype));
        }
        let mut chunks = Vec::with_capacity(self.chunks.len() + other.chunks.len());
        chunks.extend(self.chunks.iter().cloned());
        chunks.extend(other.chunks.iter().cloned());
        Ok(Self::from_validated_chunks(self.dtype, chunks))
    }

    /// Returns a column with exactly one chunk. A column that already has one
    /// chunk is returned as-is (the chunk is shared, not copied).
    pub fn rechunk(&self) -> Result<Column> {
        if self.chunks.len() == 1 {
            return Ok(self.clone());
        }
        Ok(Self::from_validated_chunks(self.dtype, vec![self.contiguous()?]))
    }

    /// The column's data as one contiguous Arrow array.
    pub fn contiguous(&self) -> Result<ArrayRef> {
        match self.chunks.as_slice() {
            [single] => Ok(Arc::clone(single)),
            [] => Ok(new_empty_array(&self.dtype.to_arrow_type())),
            _ if self.dtype == ColumnType::Null => Ok(Arc::new(NullArray::new(self.len()))),
            chunks => {
                log_metric!("event" = "concat_chunks", "chunks" = chunks.len(), "rows" = self.len());
                let refs: Vec<&dyn Array> = chunks.iter().map(|c| c.as_ref()).collect();
                Ok(arrow::compute::concat(&refs)?)
            }
        }
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
