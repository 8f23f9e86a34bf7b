// In: src/grouping/aggregate.rs

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

use super::key::{key_scalars, KeyScalar};
use super::{Group, Grouping};
use crate::column::Column;
use crate::config::EngineConfig;
use crate::error::{Result, StrataError};
use crate::table::Table;
use crate::types::ColumnType;

//==================================================================================
// 1. Grouping
//==================================================================================

/// Partitions the rows of `table` by the values of the `keys` columns.
///
/// # Errors
/// `Arity` if `keys` is empty, `ColumnNotFound` listing every absent key.
pub fn group_by(table: &Table, keys: &[&str]) -> Result<Grouping> {
    if keys.is_empty() {
        return Err(StrataError::Arity(
            "group_by requires at least one key column".to_string(),
        ));
    }
    let missing: Vec<String> = keys
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StrataError::ColumnNotFound { missing });
    }

    let mut key_types = Vec::with_capacity(keys.len());
    let mut key_cells = Vec::with_capacity(keys.len());
    for name in keys {
        let column = table.require_column(name)?;
        key_types.push(column.dtype());
        key_cells.push(key_scalars(column)?);
    }

    let mut index: HashMap<Vec<KeyScalar>, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for row in 0..table.num_rows() {
        let key: Vec<KeyScalar> = key_cells.iter().map(|cells| cells[row].clone()).collect();
        match index.entry(key) {
            Entry::Occupied(slot) => groups[*slot.get()].rows.push(row),
            Entry::Vacant(slot) => {
                let captured = slot.key().clone();
                slot.insert(groups.len());
                groups.push(Group {
                    keys: captured,
                    rows: vec![row],
                });
            }
        }
    }

    log::info!(
        "group_by {:?}: {} rows -> {} groups",
        keys,
        table.num_rows(),
        groups.len()
    );

    Ok(Grouping {
        table: table.clone(),
        key_names: keys.iter().map(|k| k.to_string()).collect(),
        key_types,
        groups,
    })
}

//==================================================================================
// 2. Result Assembly
//==================================================================================

/// Rebuilds key column `k` from the captured group keys.
///
/// Int64, Float64 and String keys keep their type; any other key type is
/// rendered as String.
fn key_column(grouping: &Grouping, k: usize) -> Result<Column> {
    let cells = grouping.groups.iter().map(|g| &g.keys[k]);
    match grouping.key_types[k] {
        ColumnType::Int64 => Column::from_options(
            cells
                .map(|key| match key {
                    KeyScalar::Int(v) => Some(*v),
                    _ => None,
                })
                .collect(),
        ),
        ColumnType::Float64 => Column::from_options(
            cells
                .map(|key| match key {
                    KeyScalar::Float(bits) => Some(f64::from_bits(*bits)),
                    _ => None,
                })
                .collect(),
        ),
        _ => Column::from_options(
            cells
                .map(|key| match key {
                    KeyScalar::Null => None,
                    KeyScalar::Int(v) => Some(v.to_string()),
                    KeyScalar::Float(bits) => Some(f64::from_bits(*bits).to_string()),
                    KeyScalar::Bool(v) => Some(v.to_string()),
                    KeyScalar::Str(v) => Some(v.clone()),
                })
                .collect(),
        ),
    }
}

/// `name`, with `_` appended until it differs from every key name.
fn unique_result_name(key_names: &[String], name: String) -> String {
    let mut candidate = name;
    while key_names.iter().any(|k| *k == candidate) {
        candidate.push('_');
    }
    candidate
}

/// Key columns followed by one aggregate column.
fn assemble(grouping: &Grouping, name: String, values: Column) -> Result<Table> {
    let mut columns = Vec::with_capacity(grouping.key_names.len() + 1);
    for (k, key_name) in grouping.key_names.iter().enumerate() {
        columns.push((key_name.clone(), key_column(grouping, k)?));
    }
    columns.push((unique_result_name(&grouping.key_names, name), values));
    Table::try_with_num_rows(columns, grouping.groups.len())
}

/// The target column's numeric cells, or `TypeMismatch` for any other type.
enum NumericCells {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
}

fn numeric_cells(grouping: &Grouping, target: &str, context: &str) -> Result<NumericCells> {
    let column = grouping.table.require_column(target)?;
    match column.dtype() {
        ColumnType::Int64 => Ok(NumericCells::Int(column.to_vec()?)),
        ColumnType::Float64 => Ok(NumericCells::Float(column.to_vec()?)),
        other => Err(StrataError::type_mismatch(
            format!("{} of '{}'", context, target),
            "numeric (Int64 or Float64)",
            other,
        )),
    }
}

/// Folds each group's non-null cells; a group with none yields `None`.
fn reduce_groups<T: Copy, R>(
    grouping: &Grouping,
    cells: &[Option<T>],
    reduce: impl Fn(&mut dyn Iterator<Item = T>) -> Option<R>,
) -> Vec<Option<R>> {
    grouping
        .groups
        .iter()
        .map(|g| {
            let mut present = g.rows.iter().filter_map(|&row| cells[row]);
            reduce(&mut present)
        })
        .collect()
}

//==================================================================================
// 3. Reducers
//==================================================================================

/// Row count per group, named `n`.
///
/// Every aggregate renames its result column with trailing `_`s if the name
/// is already taken by a key column.
pub fn aggregate_count(grouping: &Grouping) -> Result<Table> {
    aggregate_count_with_config(grouping, &EngineConfig::default())
}

/// Row count per group, named after `config.count_column_name`.
pub fn aggregate_count_with_config(grouping: &Grouping, config: &EngineConfig) -> Result<Table> {
    let counts: Vec<i64> = grouping.groups.iter().map(|g| g.rows.len() as i64).collect();
    log_metric!("event" = "aggregate", "op" = "count", "groups" = counts.len());
    assemble(
        grouping,
        config.count_column_name.clone(),
        Column::from_values(counts, &[])?,
    )
}

/// Sum of each group's non-null `target` values, named `<target>_sum`.
///
/// Int64 sums wrap on overflow and stay Int64; Float64 sums stay Float64.
/// A group whose target cells are all null gets a null sum.
pub fn aggregate_sum(grouping: &Grouping, target: &str) -> Result<Table> {
    let sums = match numeric_cells(grouping, target, "sum")? {
        NumericCells::Int(cells) => Column::from_options(reduce_groups(grouping, &cells, |it| {
            it.next().map(|first| it.fold(first, i64::wrapping_add))
        }))?,
        NumericCells::Float(cells) => Column::from_options(reduce_groups(grouping, &cells, |it| {
            it.next().map(|first| it.fold(first, |acc, v| acc + v))
        }))?,
    };
    log_metric!("event" = "aggregate", "op" = "sum", "target" = target, "groups" = sums.len());
    assemble(grouping, format!("{}_sum", target), sums)
}

/// Mean of each group's non-null `target` values, named `<target>_mean`, always Float64.
/// A group whose target cells are all null gets a null mean.
pub fn aggregate_mean(grouping: &Grouping, target: &str) -> Result<Table> {
    fn mean(it: &mut dyn Iterator<Item = f64>) -> Option<f64> {
        let (sum, n) = it.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        (n > 0).then(|| sum / n as f64)
    }
    let means = match numeric_cells(grouping, target, "mean")? {
        NumericCells::Int(cells) => {
            let cells: Vec<Option<f64>> = cells.into_iter().map(|v| v.map(|v| v as f64)).collect();
            reduce_groups(grouping, &cells, mean)
        }
        NumericCells::Float(cells) => reduce_groups(grouping, &cells, mean),
    };
    log_metric!("event" = "aggregate", "op" = "mean", "target" = target, "groups" = means.len());
    assemble(grouping, format!("{}_mean", target), Column::from_options(means)?)
}
