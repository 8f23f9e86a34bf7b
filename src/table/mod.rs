// In: src/table/mod.rs

//! The Table: a named, ordered collection of equal-length columns plus a row count.
//!
//! Tables are immutable once built. Every operation that "changes" a table
//! returns a new one that shares the untouched columns' chunks with its source.
//! Construction either yields a table satisfying every invariant or an error;
//! there is no partially built state.

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow_schema::{Field, Schema};
use hashbrown::HashSet;

use crate::column::Column;
use crate::error::{Result, StrataError};
use crate::export::{self, BufferView};
use crate::kernels;
use crate::traits::ExportNative;
use crate::types::ColumnType;

#[derive(Debug, Clone)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    num_rows: usize,
}

impl Table {
    //==============================================================================
    // 1. Construction
    //==============================================================================

    /// Builds a table, taking the row count from the first column.
    /// A table with no columns has zero rows; use [`Table::try_with_num_rows`]
    /// to build a zero-column table with rows.
    pub fn try_new(columns: Vec<(String, Column)>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, |(_, c)| c.len());
        Self::try_with_num_rows(columns, num_rows)
    }

    /// Builds a table with an explicit row count.
    ///
    /// # Errors
    /// `DuplicateColumn` if two columns share a name, `ShapeMismatch` if any
    /// column's length differs from `num_rows`.
    pub fn try_with_num_rows(columns: Vec<(String, Column)>, num_rows: usize) -> Result<Self> {
        {
            let mut seen = HashSet::with_capacity(columns.len());
            for (name, column) in &columns {
                if !seen.insert(name.as_str()) {
                    return Err(StrataError::DuplicateColumn(name.clone()));
                }
                if column.len() != num_rows {
                    return Err(StrataError::ShapeMismatch(format!(
                        "column '{}' has {} rows, table has {}",
                        name,
                        column.len(),
                        num_rows
                    )));
                }
            }
        }
        let (names, columns) = columns.into_iter().unzip();
        Ok(Self {
            names,
            columns,
            num_rows,
        })
    }

    //==============================================================================
    // 2. Inspection
    //==============================================================================

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    /// Iterates `(name, column)` pairs in schema order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> + '_ {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    pub fn schema(&self) -> Vec<(String, ColumnType)> {
        self.columns()
            .map(|(name, column)| (name.to_string(), column.dtype()))
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    pub fn column_at(&self, index: usize) -> Option<(&str, &Column)> {
        self.columns
            .get(index)
            .map(|column| (self.names[index].as_str(), column))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Like [`Table::column`], but a missing name is a `ColumnNotFound` error.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| StrataError::column_not_found(name))
    }

    //==============================================================================
    // 3. Derivation (every method returns a new table)
    //==============================================================================

    /// Adds `column` under `name`, or replaces the existing column of that name.
    ///
    /// A new name is appended at the end; an existing one keeps its position.
    pub fn with_column(&self, name: &str, column: Column) -> Result<Table> {
        if column.len() != self.num_rows {
            return Err(StrataError::ShapeMismatch(format!(
                "column '{}' has {} rows, table has {}",
                name,
                column.len(),
                self.num_rows
            )));
        }
        let mut next = self.clone();
        match self.column_index(name) {
            Some(i) => next.columns[i] = column,
            None => {
                next.names.push(name.to_string());
                next.columns.push(column);
            }
        }
        Ok(next)
    }

    /// See [`kernels::project`].
    pub fn select_columns(&self, names: &[&str]) -> Result<Table> {
        kernels::project(self, names)
    }

    /// See [`export::buffer_view`].
    pub fn buffer_view<T: ExportNative>(&self, name: &str) -> Result<BufferView<'_, T>> {
        export::buffer_view(self.require_column(name)?)
    }

    //==============================================================================
    // 4. Arrow Interop
    //==============================================================================

    /// Exports the table as one Arrow `RecordBatch`; multi-chunk columns are concatenated.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let fields: Vec<Field> = self
            .columns()
            .map(|(name, column)| Field::new(name, column.dtype().to_arrow_type(), true))
            .collect();
        let arrays = self
            .columns
            .iter()
            .map(Column::contiguous)
            .collect::<Result<Vec<ArrayRef>>>()?;
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows));
        Ok(RecordBatch::try_new_with_options(
            Arc::new(Schema::new(fields)),
            arrays,
            &options,
        )?)
    }

    /// Imports a `RecordBatch`; each Arrow column becomes a one-chunk column.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Table> {
        let columns = batch
            .schema()
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, array)| Ok((field.name().clone(), Column::from_array(Arc::clone(array))?)))
            .collect::<Result<Vec<_>>>()?;
        Self::try_with_num_rows(columns, batch.num_rows())
    }
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
