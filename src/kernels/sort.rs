//! Index-permutation sorting.
//!
//! Sorting happens in two steps: `sort_indices` computes a stable permutation
//! from one column, then `sort_by_indices` gathers every column through it.

use std::cmp::Ordering;

use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, StringArray, UInt32Array};

use super::downcast_chunk;
use crate::column::Column;
use crate::error::{Result, StrataError};
use crate::table::Table;
use crate::types::ColumnType;

/// Sorts `indices` with nulls always last and ties kept in input order.
///
/// `ascending` only flips the comparison between two present values.
fn stable_sort_nulls_last(
    indices: &mut [u32],
    is_valid: impl Fn(usize) -> bool,
    compare: impl Fn(usize, usize) -> Ordering,
    ascending: bool,
) {
    indices.sort_by(|&a, &b| {
        let (a, b) = (a as usize, b as usize);
        match (is_valid(a), is_valid(b)) {
            (true, true) => {
                let ord = compare(a, b);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            }
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
    });
}

/// Computes the row permutation that sorts `column`.
///
/// Floats compare by IEEE total order, so NaN sorts after +Infinity.
pub fn sort_indices(column: &Column, ascending: bool) -> Result<Vec<u32>> {
    let len = u32::try_from(column.len()).map_err(|_| {
        StrataError::ShapeMismatch(format!("{} rows exceed the sortable limit", column.len()))
    })?;
    let mut indices: Vec<u32> = (0..len).collect();
    if column.dtype() == ColumnType::Null {
        return Ok(indices);
    }

    let array = column.contiguous()?;
    let valid = |i: usize| array.is_valid(i);
    match column.dtype() {
        ColumnType::Int64 => {
            let a = downcast_chunk::<Int64Array>(array.as_ref())?;
            stable_sort_nulls_last(&mut indices, valid, |x, y| a.value(x).cmp(&a.value(y)), ascending);
        }
        ColumnType::Float64 => {
            let a = downcast_chunk::<Float64Array>(array.as_ref())?;
            stable_sort_nulls_last(
                &mut indices,
                valid,
                |x, y| a.value(x).total_cmp(&a.value(y)),
                ascending,
            );
        }
        ColumnType::Boolean => {
            let a = downcast_chunk::<BooleanArray>(array.as_ref())?;
            stable_sort_nulls_last(&mut indices, valid, |x, y| a.value(x).cmp(&a.value(y)), ascending);
        }
        ColumnType::String => {
            let a = downcast_chunk::<StringArray>(array.as_ref())?;
            stable_sort_nulls_last(&mut indices, valid, |x, y| a.value(x).cmp(a.value(y)), ascending);
        }
        ColumnType::Null => {}
    }
    Ok(indices)
}

/// Returns a new table with rows ordered by the named column.
///
/// # Errors
/// `ColumnNotFound` if `name` is absent.
pub fn sort_by_column(table: &Table, name: &str, ascending: bool) -> Result<Table> {
    let column = table.require_column(name)?;
    let indices = sort_indices(column, ascending)?;
    log_metric!("event" = "sort", "column" = name, "rows" = indices.len(), "ascending" = ascending);
    sort_by_indices(table, &indices)
}

/// Gathers every column through `indices`: output row `i` is input row `indices[i]`.
///
/// Output columns are single-chunk.
///
/// # Errors
/// `IndexOutOfBounds` if any index is not a valid row.
pub fn sort_by_indices(table: &Table, indices: &[u32]) -> Result<Table> {
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= table.num_rows()) {
        return Err(StrataError::IndexOutOfBounds {
            index: bad as usize,
            len: table.num_rows(),
        });
    }
    let take_indices = UInt32Array::from(indices.to_vec());
    let columns = table
        .columns()
        .map(|(name, column)| Ok((name.to_string(), gather_column(column, &take_indices)?)))
        .collect::<Result<Vec<_>>>()?;
    Table::try_with_num_rows(columns, indices.len())
}

fn gather_column(column: &Column, indices: &UInt32Array) -> Result<Column> {
    if column.dtype() == ColumnType::Null {
        return Ok(Column::nulls(indices.len()));
    }
    let source = column.contiguous()?;
    let gathered = arrow::compute::take(source.as_ref(), indices, None)?;
    Column::try_from_chunks(column.dtype(), vec![gathered])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ages(values: Vec<Option<i64>>) -> Table {
        Table::try_new(vec![
            ("age".to_string(), Column::from_options(values).unwrap()),
        ])
        .unwrap()
    }

    fn age_values(t: &Table) -> Vec<Option<i64>> {
        t.column("age").unwrap().to_vec::<i64>().unwrap()
    }

    #[test]
    fn test_sort_descending() {
        let t = ages(vec![Some(30), Some(25), Some(35)]);
        let sorted = sort_by_column(&t, "age", false).unwrap();
        assert_eq!(age_values(&sorted), vec![Some(35), Some(30), Some(25)]);
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let t = ages(vec![None, Some(2), Some(1), None, Some(3)]);
        let asc = sort_by_column(&t, "age", true).unwrap();
        assert_eq!(age_values(&asc), vec![Some(1), Some(2), Some(3), None, None]);
        let desc = sort_by_column(&t, "age", false).unwrap();
        assert_eq!(age_values(&desc), vec![Some(3), Some(2), Some(1), None, None]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let key = Column::from_values(vec![1i64, 0, 1, 0], &[]).unwrap();
        let tag = Column::from_values(
            vec!["a".to_string(), "b".into(), "c".into(), "d".into()],
            &[],
        )
        .unwrap();
        let t = Table::try_new(vec![("k".to_string(), key), ("tag".to_string(), tag)]).unwrap();

        let asc = sort_by_column(&t, "k", true).unwrap();
        let tags: Vec<Option<String>> = asc.column("tag").unwrap().to_vec().unwrap();
        assert_eq!(tags, vec![Some("b".into()), Some("d".into()), Some("a".into()), Some("c".into())]);

        let desc = sort_by_column(&t, "k", false).unwrap();
        let tags: Vec<Option<String>> = desc.column("tag").unwrap().to_vec().unwrap();
        assert_eq!(tags, vec![Some("a".into()), Some("c".into()), Some("b".into()), Some("d".into())]);
    }

    #[test]
    fn test_sort_floats_strings_and_bools() {
        let f = Column::from_options(vec![Some(2.5f64), Some(-1.0), None, Some(f64::INFINITY)]).unwrap();
        let s = Column::from_values(vec!["b".to_string(), "a".into(), "d".into(), "c".into()], &[]).unwrap();
        let b = Column::from_values(vec![true, false, true, false], &[]).unwrap();
        let t = Table::try_new(vec![
            ("f".to_string(), f),
            ("s".to_string(), s),
            ("b".to_string(), b),
        ])
        .unwrap();

        let by_f = sort_by_column(&t, "f", true).unwrap();
        assert_eq!(
            by_f.column("f").unwrap().to_vec::<f64>().unwrap(),
            vec![Some(-1.0), Some(2.5), Some(f64::INFINITY), None]
        );
        let by_s = sort_by_column(&t, "s", false).unwrap();
        let s_vals: Vec<Option<String>> = by_s.column("s").unwrap().to_vec().unwrap();
        assert_eq!(s_vals, vec![Some("d".into()), Some("c".into()), Some("b".into()), Some("a".into())]);
        let by_b = sort_by_column(&t, "b", true).unwrap();
        assert_eq!(
            by_b.column("b").unwrap().to_vec::<bool>().unwrap(),
            vec![Some(false), Some(false), Some(true), Some(true)]
        );
    }

    #[test]
    fn test_sort_multi_chunk_column() {
        let a = Column::from_values(vec![5i64, 1], &[]).unwrap();
        let b = Column::from_values(vec![3i64], &[]).unwrap();
        let t = Table::try_new(vec![("age".to_string(), a.append(&b).unwrap())]).unwrap();
        let sorted = sort_by_column(&t, "age", true).unwrap();
        assert_eq!(age_values(&sorted), vec![Some(1), Some(3), Some(5)]);
        assert_eq!(sorted.column("age").unwrap().num_chunks(), 1);
    }

    #[test]
    fn test_sort_missing_column() {
        let result = sort_by_column(&ages(vec![Some(1)]), "nope", true);
        assert!(matches!(result, Err(StrataError::ColumnNotFound { .. })));
    }

    #[test]
    fn test_sort_by_indices_out_of_range() {
        let result = sort_by_indices(&ages(vec![Some(1)]), &[0, 1]);
        assert!(matches!(
            result,
            Err(StrataError::IndexOutOfBounds { index: 1, len: 1 })
        ));
    }
}
