//! Element-wise arithmetic of a numeric column against a scalar.
//!
//! The output is always Float64: Int64 inputs are promoted before the
//! operation. Division follows IEEE-754 and never fails.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, PrimitiveArray};
use arrow::datatypes::{ArrowPrimitiveType, Float64Type, Int64Type};
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use super::downcast_chunk;
use crate::column::Column;
use crate::error::{Result, StrataError};
use crate::table::Table;
use crate::types::ColumnType;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    /// `lhs <op> rhs`, with the column value on the left.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            ArithmeticOp::Add => lhs + rhs,
            ArithmeticOp::Subtract => lhs - rhs,
            ArithmeticOp::Multiply => lhs * rhs,
            ArithmeticOp::Divide => lhs / rhs,
        }
    }
}

fn promote_chunk<T>(chunk: &ArrayRef, scalar: f64, op: ArithmeticOp) -> Result<ArrayRef>
where
    T: ArrowPrimitiveType,
    T::Native: AsPrimitive<f64>,
{
    let array = downcast_chunk::<PrimitiveArray<T>>(chunk.as_ref())?;
    // `unary` carries the null buffer over untouched.
    let out: Float64Array = array.unary::<_, Float64Type>(|v| op.apply(v.as_(), scalar));
    Ok(Arc::new(out))
}

/// Applies `op` to every cell of a numeric column, chunk by chunk.
///
/// # Errors
/// `TypeMismatch` if the column is not Int64 or Float64.
pub fn scalar_op_column(column: &Column, scalar: f64, op: ArithmeticOp) -> Result<Column> {
    let chunks = match column.dtype() {
        ColumnType::Int64 => column
            .chunks()
            .iter()
            .map(|c| promote_chunk::<Int64Type>(c, scalar, op))
            .collect::<Result<Vec<_>>>()?,
        ColumnType::Float64 => column
            .chunks()
            .iter()
            .map(|c| promote_chunk::<Float64Type>(c, scalar, op))
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(StrataError::type_mismatch(
                "scalar_op",
                "numeric (Int64 or Float64)",
                other,
            ))
        }
    };
    Column::try_from_chunks(ColumnType::Float64, chunks)
}

/// Returns `table` with the named column replaced by `column <op> scalar`.
/// The column keeps its name and position; its type becomes Float64.
///
/// # Errors
/// `ColumnNotFound` if absent, `TypeMismatch` if not numeric.
pub fn scalar_op(table: &Table, column: &str, scalar: f64, op: ArithmeticOp) -> Result<Table> {
    let source = table.require_column(column)?;
    let result = scalar_op_column(source, scalar, op)?;
    log_metric!("event" = "scalar_op", "column" = column, "op" = format!("{:?}", op));
    table.with_column(column, result)
}

pub fn scalar_add(table: &Table, column: &str, scalar: f64) -> Result<Table> {
    scalar_op(table, column, scalar, ArithmeticOp::Add)
}

pub fn scalar_subtract(table: &Table, column: &str, scalar: f64) -> Result<Table> {
    scalar_op(table, column, scalar, ArithmeticOp::Subtract)
}

pub fn scalar_multiply(table: &Table, column: &str, scalar: f64) -> Result<Table> {
    scalar_op(table, column, scalar, ArithmeticOp::Multiply)
}

pub fn scalar_divide(table: &Table, column: &str, scalar: f64) -> Result<Table> {
    scalar_op(table, column, scalar, ArithmeticOp::Divide)
}
