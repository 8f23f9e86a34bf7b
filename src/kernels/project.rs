//! Column projection.

use crate::error::{Result, StrataError};
use crate::table::Table;

/// Returns a table holding only `names`, in the requested order.
///
/// The projected columns share their chunks with `table`; no row data is
/// copied. An empty `names` yields a zero-column table with the same row count.
///
/// # Errors
/// `ColumnNotFound` listing *every* absent name (the whole list is validated
/// before failing). Naming a column twice is a `DuplicateColumn` error.
pub fn project(table: &Table, names: &[&str]) -> Result<Table> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StrataError::ColumnNotFound { missing });
    }

    let columns = names
        .iter()
        .map(|&name| Ok((name.to_string(), table.require_column(name)?.clone())))
        .collect::<Result<Vec<_>>>()?;
    Table::try_with_num_rows(columns, table.num_rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use std::sync::Arc;

    fn abc() -> Table {
        Table::try_new(vec![
            ("a".to_string(), Column::from_values(vec![1i64, 2], &[]).unwrap()),
            ("b".to_string(), Column::from_values(vec![1.0f64, 2.0], &[]).unwrap()),
            ("c".to_string(), Column::from_values(vec![true, false], &[]).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn test_project_reorders_and_keeps_rows() {
        let t = abc();
        let p = project(&t, &["c", "a"]).unwrap();
        assert_eq!(p.column_names(), vec!["c", "a"]);
        assert_eq!(p.num_rows(), t.num_rows());
    }

    #[test]
    fn test_project_shares_chunks() {
        let t = abc();
        let p = project(&t, &["a"]).unwrap();
        let before = &t.column("a").unwrap().chunks()[0];
        let after = &p.column("a").unwrap().chunks()[0];
        assert!(Arc::ptr_eq(before, after));
    }

    #[test]
    fn test_project_reports_all_missing_names() {
        let result = project(&abc(), &["x", "a", "y"]);
        match result {
            Err(StrataError::ColumnNotFound { missing }) => {
                assert_eq!(missing, vec!["x".to_string(), "y".to_string()]);
            }
            other => panic!("Expected ColumnNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_project_empty_list_keeps_row_count() {
        let p = project(&abc(), &[]).unwrap();
        assert_eq!(p.num_columns(), 0);
        assert_eq!(p.num_rows(), 2);
    }
}
