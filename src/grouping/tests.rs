// In: src/grouping/tests.rs

use super::*;
use crate::bridge::{from_columns, MissingKind, Value};
use crate::column::Column;
use crate::error::{ErrorKind, StrataError};

fn staff() -> Table {
    from_columns(
        vec![
            ("dept".to_string(), vec!["eng".into(), "eng".into(), "sales".into()]),
            ("age".to_string(), vec![30i64.into(), 25i64.into(), 35i64.into()]),
        ],
        3,
    )
    .unwrap()
}

fn strings(t: &Table, name: &str) -> Vec<Option<String>> {
    t.column(name).unwrap().to_vec().unwrap()
}

#[test]
fn test_count_by_dept_in_first_seen_order() {
    // Arrange
    let grouping = group_by(&staff(), &["dept"]).unwrap();

    // Act
    let result = grouping.count().unwrap();

    // Assert
    assert_eq!(result.column_names(), vec!["dept", "n"]);
    assert_eq!(strings(&result, "dept"), vec![Some("eng".into()), Some("sales".into())]);
    assert_eq!(
        result.column("n").unwrap().to_vec::<i64>().unwrap(),
        vec![Some(2), Some(1)]
    );
}

#[test]
fn test_group_sizes_cover_every_row() {
    let t = from_columns(
        vec![(
            "k".to_string(),
            vec![3i64.into(), 1i64.into(), 3i64.into(), Value::Missing(MissingKind::Int), 1i64.into()],
        )],
        5,
    )
    .unwrap();
    let grouping = group_by(&t, &["k"]).unwrap();
    assert_eq!(grouping.num_groups(), 3);
    let total: usize = (0..grouping.num_groups())
        .map(|i| grouping.group_rows(i).unwrap().len())
        .sum();
    assert_eq!(total, t.num_rows());
    assert_eq!(grouping.group_rows(0).unwrap(), &[0, 2]);
    assert_eq!(grouping.group_rows(2).unwrap(), &[3]);
    assert_eq!(
        grouping.group_keys(2).unwrap(),
        vec![Value::Missing(MissingKind::Int)]
    );
}

#[test]
fn test_single_key_value_is_one_group() {
    let t = from_columns(vec![("k".to_string(), vec!["x".into(); 4])], 4).unwrap();
    let grouping = group_by(&t, &["k"]).unwrap();
    assert_eq!(grouping.num_groups(), 1);
    assert_eq!(grouping.group_rows(0).unwrap(), &[0, 1, 2, 3]);
}

#[test]
fn test_multi_key_grouping() {
    let t = from_columns(
        vec![
            ("a".to_string(), vec!["x".into(), "x".into(), "y".into(), "x".into()]),
            ("b".to_string(), vec![1i64.into(), 2i64.into(), 1i64.into(), 1i64.into()]),
            ("v".to_string(), vec![1.0.into(), 2.0.into(), 3.0.into(), 4.0.into()]),
        ],
        4,
    )
    .unwrap();
    let grouping = group_by(&t, &["a", "b"]).unwrap();
    assert_eq!(grouping.key_names(), vec!["a", "b"]);
    assert_eq!(grouping.group_keys(0).unwrap(), vec![Value::from("x"), Value::Int(1)]);

    let sums = grouping.sum("v").unwrap();
    assert_eq!(sums.column_names(), vec!["a", "b", "v_sum"]);
    assert_eq!(sums.column("b").unwrap().dtype(), ColumnType::Int64);
    assert_eq!(
        sums.column("v_sum").unwrap().to_vec::<f64>().unwrap(),
        vec![Some(5.0), Some(2.0), Some(3.0)]
    );
}

#[test]
fn test_sum_and_mean_skip_nulls_and_null_out_empty_groups() {
    let t = from_columns(
        vec![
            ("g".to_string(), vec!["a".into(), "a".into(), "b".into(), "a".into()]),
            (
                "x".to_string(),
                vec![
                    10i64.into(),
                    Value::Missing(MissingKind::Int),
                    Value::Missing(MissingKind::Int),
                    5i64.into(),
                ],
            ),
        ],
        4,
    )
    .unwrap();
    let grouping = group_by(&t, &["g"]).unwrap();

    let sums = grouping.sum("x").unwrap();
    let sum_col = sums.column("x_sum").unwrap();
    assert_eq!(sum_col.dtype(), ColumnType::Int64);
    assert_eq!(sum_col.to_vec::<i64>().unwrap(), vec![Some(15), None]);

    let means = grouping.mean("x").unwrap();
    let mean_col = means.column("x_mean").unwrap();
    assert_eq!(mean_col.dtype(), ColumnType::Float64);
    assert_eq!(mean_col.to_vec::<f64>().unwrap(), vec![Some(7.5), None]);

    // Count never looks at the target and is never null.
    let counts = grouping.count().unwrap();
    assert_eq!(
        counts.column("n").unwrap().to_vec::<i64>().unwrap(),
        vec![Some(3), Some(1)]
    );
}

#[test]
fn test_boolean_keys_are_rendered_as_strings() {
    let t = from_columns(
        vec![("flag".to_string(), vec![true.into(), false.into(), true.into()])],
        3,
    )
    .unwrap();
    let result = aggregate_count(&group_by(&t, &["flag"]).unwrap()).unwrap();
    assert_eq!(result.column("flag").unwrap().dtype(), ColumnType::String);
    assert_eq!(strings(&result, "flag"), vec![Some("true".into()), Some("false".into())]);
}

#[test]
fn test_count_column_name_from_config() {
    let config = EngineConfig {
        count_column_name: "rows".to_string(),
        ..Default::default()
    };
    let result = group_by(&staff(), &["dept"])
        .unwrap()
        .count_with_config(&config)
        .unwrap();
    assert_eq!(result.column_names(), vec!["dept", "rows"]);
}

#[test]
fn test_empty_table_has_no_groups() {
    let t = Table::try_new(vec![("k".to_string(), Column::empty(ColumnType::Float64))]).unwrap();
    let result = aggregate_count(&group_by(&t, &["k"]).unwrap()).unwrap();
    assert_eq!(result.num_rows(), 0);
    assert_eq!(result.column("k").unwrap().dtype(), ColumnType::Float64);
}

#[test]
fn test_group_by_errors() {
    let t = staff();
    let err = group_by(&t, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arity);

    let err = group_by(&t, &["dept", "team", "site"]).unwrap_err();
    assert!(matches!(
        err,
        StrataError::ColumnNotFound { ref missing } if missing == &["team", "site"]
    ));
}

#[test]
fn test_aggregate_target_errors() {
    let grouping = group_by(&staff(), &["dept"]).unwrap();
    assert!(matches!(
        grouping.sum("salary"),
        Err(StrataError::ColumnNotFound { .. })
    ));
    assert!(matches!(
        grouping.mean("dept"),
        Err(StrataError::TypeMismatch { .. })
    ));
}

#[test]
fn test_result_name_colliding_with_a_key_is_suffixed() {
    // Arrange: keys named like the default count column and a sum column.
    let t = from_columns(
        vec![
            ("n".to_string(), vec![1i64.into(), 1i64.into(), 2i64.into()]),
            ("x_sum".to_string(), vec!["a".into(), "a".into(), "a".into()]),
            ("x".to_string(), vec![1.0.into(), 2.0.into(), 4.0.into()]),
        ],
        3,
    )
    .unwrap();
    let grouping = group_by(&t, &["n", "x_sum"]).unwrap();

    // Act
    let counts = grouping.count().unwrap();
    let sums = grouping.sum("x").unwrap();

    // Assert
    assert_eq!(counts.column_names(), vec!["n", "x_sum", "n_"]);
    assert_eq!(
        counts.column("n_").unwrap().to_vec::<i64>().unwrap(),
        vec![Some(2), Some(1)]
    );
    assert_eq!(sums.column_names(), vec!["n", "x_sum", "x_sum_"]);
    assert_eq!(
        sums.column("x_sum_").unwrap().to_vec::<f64>().unwrap(),
        vec![Some(3.0), Some(4.0)]
    );
}
