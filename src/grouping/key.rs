// In: src/grouping/key.rs

//! Typed composite grouping keys.
//!
//! One `KeyScalar` per key column, compared structurally. Two rows fall into
//! the same group exactly when every key cell is equal, with null equal to
//! null and every NaN equal to every other NaN.

use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};

use crate::bridge::{MissingKind, Value};
use crate::column::Column;
use crate::error::Result;
use crate::kernels::downcast_chunk;
use crate::types::ColumnType;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyScalar {
    Null,
    Int(i64),
    /// IEEE bit pattern; NaNs are canonicalized, `-0.0` stays distinct from `0.0`.
    Float(u64),
    Bool(bool),
    Str(String),
}

impl KeyScalar {
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            KeyScalar::Float(f64::NAN.to_bits())
        } else {
            KeyScalar::Float(value.to_bits())
        }
    }

    /// The key as a bridge value; a null key becomes a marker typed after `dtype`.
    pub fn to_value(&self, dtype: ColumnType) -> Value {
        match self {
            KeyScalar::Null => Value::Missing(MissingKind::for_column_type(dtype)),
            KeyScalar::Int(v) => Value::Int(*v),
            KeyScalar::Float(bits) => Value::Float(f64::from_bits(*bits)),
            KeyScalar::Bool(v) => Value::Bool(*v),
            KeyScalar::Str(v) => Value::Str(v.clone()),
        }
    }
}

/// Reads every cell of a key column as a `KeyScalar`.
pub(crate) fn key_scalars(column: &Column) -> Result<Vec<KeyScalar>> {
    if column.dtype() == ColumnType::Null {
        return Ok(vec![KeyScalar::Null; column.len()]);
    }
    let array = column.contiguous()?;
    let keys = match column.dtype() {
        ColumnType::Int64 => {
            let a = downcast_chunk::<Int64Array>(array.as_ref())?;
            a.iter().map(|v| v.map_or(KeyScalar::Null, KeyScalar::Int)).collect()
        }
        ColumnType::Float64 => {
            let a = downcast_chunk::<Float64Array>(array.as_ref())?;
            a.iter().map(|v| v.map_or(KeyScalar::Null, KeyScalar::from_f64)).collect()
        }
        ColumnType::Boolean => {
            let a = downcast_chunk::<BooleanArray>(array.as_ref())?;
            a.iter().map(|v| v.map_or(KeyScalar::Null, KeyScalar::Bool)).collect()
        }
        ColumnType::String => {
            let a = downcast_chunk::<StringArray>(array.as_ref())?;
            a.iter()
                .map(|v| v.map_or(KeyScalar::Null, |s| KeyScalar::Str(s.to_string())))
                .collect()
        }
        ColumnType::Null => Vec::new(),
    };
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_keys_are_equal() {
        let a = KeyScalar::from_f64(f64::NAN);
        let b = KeyScalar::from_f64(-f64::NAN);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signed_zero_keys_differ() {
        assert_ne!(KeyScalar::from_f64(0.0), KeyScalar::from_f64(-0.0));
    }

    #[test]
    fn test_composite_keys_have_no_separator_collisions() {
        // "a|b" + "c" and "a" + "b|c" would collide under string concatenation.
        let left = vec![KeyScalar::Str("a|b".into()), KeyScalar::Str("c".into())];
        let right = vec![KeyScalar::Str("a".into()), KeyScalar::Str("b|c".into())];
        assert_ne!(left, right);
    }

    #[test]
    fn test_key_scalars_over_chunks_and_nulls() {
        let a = Column::from_values(vec![1i64, 2], &[1]).unwrap();
        let b = Column::from_values(vec![3i64], &[]).unwrap();
        let keys = key_scalars(&a.append(&b).unwrap()).unwrap();
        assert_eq!(keys, vec![KeyScalar::Int(1), KeyScalar::Null, KeyScalar::Int(3)]);
    }

    #[test]
    fn test_null_key_value_keeps_column_type() {
        assert_eq!(
            KeyScalar::Null.to_value(ColumnType::String),
            Value::Missing(MissingKind::String)
        );
    }
}
