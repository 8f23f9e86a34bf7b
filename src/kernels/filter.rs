//! Row selection by boolean mask.

use arrow::array::{Array, BooleanArray};

use crate::column::Column;
use crate::error::{Result, StrataError};
use crate::table::Table;
use crate::types::ColumnType;

/// Keeps the rows where `mask` is true, preserving column order, types and
/// each column's chunk layout. Null mask slots count as false.
///
/// # Errors
/// `ShapeMismatch` if the mask length differs from the table's row count.
pub fn filter(table: &Table, mask: &BooleanArray) -> Result<Table> {
    if mask.len() != table.num_rows() {
        return Err(StrataError::ShapeMismatch(format!(
            "mask has {} entries, table has {} rows",
            mask.len(),
            table.num_rows()
        )));
    }
    let kept = mask.true_count();
    let columns = table
        .columns()
        .map(|(name, column)| Ok((name.to_string(), filter_column(column, mask, kept)?)))
        .collect::<Result<Vec<_>>>()?;

    log_metric!("event" = "filter", "rows_in" = table.num_rows(), "rows_out" = kept);
    Table::try_with_num_rows(columns, kept)
}

/// Convenience over [`filter`] for hosts holding a plain `bool` slice.
pub fn filter_by_bools(table: &Table, mask: &[bool]) -> Result<Table> {
    filter(table, &BooleanArray::from(mask.to_vec()))
}

fn filter_column(column: &Column, mask: &BooleanArray, kept: usize) -> Result<Column> {
    if column.dtype() == ColumnType::Null {
        return Ok(Column::nulls(kept));
    }
    let mut offset = 0;
    let mut chunks = Vec::with_capacity(column.num_chunks());
    for chunk in column.chunks() {
        // Each chunk is filtered by the matching window of the mask.
        let window = mask.slice(offset, chunk.len());
        offset += chunk.len();
        chunks.push(arrow::compute::filter(chunk.as_ref(), &window)?);
    }
    Column::try_from_chunks(column.dtype(), chunks)
}
