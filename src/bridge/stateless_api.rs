// In: src/bridge/stateless_api.rs

use crate::bridge::value::{MissingKind, Value};
use crate::column::Column;
use crate::config::EngineConfig;
use crate::error::{Result, StrataError};
use crate::table::Table;
use crate::traits::NativeValue;
use crate::types::ColumnType;

/// Named arrays of dynamic values, the host's column-oriented shape.
pub type NamedValues = Vec<(String, Vec<Value>)>;

/// One row as `(column name, value)` pairs in schema order.
pub type Record = Vec<(String, Value)>;

//==================================================================================
// 1. Value -> Native extraction
//==================================================================================

/// A native that can be pulled out of a present (non-missing) `Value`.
trait FromValue: NativeValue + Default {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

//==================================================================================
// 2. Rows/values -> Table
//==================================================================================

/// Infers a column's type: the first present value decides; failing that, the
/// first typed missing marker; failing that, `Null`.
fn infer_column_type(values: &[Value]) -> ColumnType {
    values
        .iter()
        .find_map(Value::column_type)
        .or_else(|| {
            values.iter().find_map(|v| match v {
                Value::Missing(kind) => kind.column_type(),
                _ => None,
            })
        })
        .unwrap_or(ColumnType::Null)
}

fn build_column<T: FromValue>(
    name: &str,
    values: &[Value],
    chunk_size: Option<usize>,
) -> Result<Column> {
    let options = values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            if value.is_missing() {
                return Ok(None);
            }
            T::from_value(value).map(Some).ok_or_else(|| StrataError::TypeMismatch {
                context: format!("column '{}' row {}", name, row),
                expected: T::COLUMN_TYPE.to_string(),
                actual: value.type_name().to_string(),
            })
        })
        .collect::<Result<Vec<Option<T>>>>()?;

    match chunk_size {
        Some(size) if options.len() > size => {
            let mut column = Column::empty(T::COLUMN_TYPE);
            for part in options.chunks(size) {
                column = column.append(&Column::from_options(part.to_vec())?)?;
            }
            Ok(column)
        }
        _ => Column::from_options(options),
    }
}

/// Builds a table from named arrays of dynamic values, with the default config.
pub fn from_columns(columns: NamedValues, row_count: usize) -> Result<Table> {
    from_columns_with_config(columns, row_count, &EngineConfig::default())
}

/// Builds a table from named arrays of dynamic values.
///
/// Each column's type is inferred from its first present value; missing
/// markers become null cells. A marker of any kind is accepted in a column of
/// any type and comes back typed after the column.
///
/// # Errors
/// `ShapeMismatch` if an array's length differs from `row_count`,
/// `DuplicateColumn` on a repeated name, `TypeMismatch` if a later value
/// disagrees with the inferred type (or is a list/record).
pub fn from_columns_with_config(
    columns: NamedValues,
    row_count: usize,
    config: &EngineConfig,
) -> Result<Table> {
    let chunk_size = config.effective_chunk_size();
    let mut built = Vec::with_capacity(columns.len());
    for (name, values) in columns {
        if values.len() != row_count {
            return Err(StrataError::ShapeMismatch(format!(
                "column '{}' has {} values, expected {}",
                name,
                values.len(),
                row_count
            )));
        }
        let column = match infer_column_type(&values) {
            ColumnType::Int64 => build_column::<i64>(&name, &values, chunk_size)?,
            ColumnType::Float64 => build_column::<f64>(&name, &values, chunk_size)?,
            ColumnType::Boolean => build_column::<bool>(&name, &values, chunk_size)?,
            ColumnType::String => build_column::<String>(&name, &values, chunk_size)?,
            ColumnType::Null => {
                // Every value is missing unless a container sneaked in.
                if let Some((row, bad)) = values.iter().enumerate().find(|(_, v)| !v.is_missing()) {
                    return Err(StrataError::TypeMismatch {
                        context: format!("column '{}' row {}", name, row),
                        expected: "scalar".to_string(),
                        actual: bad.type_name().to_string(),
                    });
                }
                Column::nulls(row_count)
            }
        };
        built.push((name, column));
    }
    log_metric!("event" = "from_columns", "columns" = built.len(), "rows" = row_count);
    Table::try_with_num_rows(built, row_count)
}

//==================================================================================
// 3. Table -> values/rows
//==================================================================================

fn natives_to_values<T: NativeValue>(
    column: &Column,
    kind: MissingKind,
    wrap: impl Fn(T) -> Value,
) -> Result<Vec<Value>> {
    Ok(column
        .to_vec::<T>()?
        .into_iter()
        .map(|v| v.map_or(Value::Missing(kind), &wrap))
        .collect())
}

/// Materializes a whole column as dynamic values; nulls become typed missing markers.
pub fn column_values(column: &Column) -> Result<Vec<Value>> {
    let kind = MissingKind::for_column_type(column.dtype());
    match column.dtype() {
        ColumnType::Int64 => natives_to_values::<i64>(column, kind, Value::Int),
        ColumnType::Float64 => natives_to_values::<f64>(column, kind, Value::Float),
        ColumnType::Boolean => natives_to_values::<bool>(column, kind, Value::Bool),
        ColumnType::String => natives_to_values::<String>(column, kind, Value::Str),
        ColumnType::Null => Ok(vec![Value::Missing(kind); column.len()]),
    }
}

/// Reads one cell as a dynamic value.
pub fn value_at(column: &Column, index: usize) -> Result<Value> {
    let dtype = column.dtype();
    if column.is_null(index)? {
        return Ok(Value::Missing(MissingKind::for_column_type(dtype)));
    }
    Ok(match dtype {
        ColumnType::Int64 => Value::Int(column.get(index)?),
        ColumnType::Float64 => Value::Float(column.get(index)?),
        ColumnType::Boolean => Value::Bool(column.get(index)?),
        ColumnType::String => Value::Str(column.get(index)?),
        ColumnType::Null => Value::Missing(MissingKind::Generic),
    })
}

/// The inverse of [`from_columns`].
pub fn to_columns(table: &Table) -> Result<NamedValues> {
    table
        .columns()
        .map(|(name, column)| Ok((name.to_string(), column_values(column)?)))
        .collect()
}

/// Materializes row `index` as `(name, value)` pairs in schema order.
pub fn row_as_record(table: &Table, index: usize) -> Result<Record> {
    if index >= table.num_rows() {
        return Err(StrataError::IndexOutOfBounds {
            index,
            len: table.num_rows(),
        });
    }
    table
        .columns()
        .map(|(name, column)| Ok((name.to_string(), value_at(column, index)?)))
        .collect()
}
