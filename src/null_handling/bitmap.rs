// --- IN: src/null_handling/bitmap.rs ---

//! Pure, stateless kernels for building validity bitmaps on the Arrow
//! `NullBuffer` API.

use arrow::buffer::NullBuffer;

use crate::error::StrataError;

/// Builds a validity bitmap of `len` slots with the given positions marked null.
///
/// Returns `None` when `positions` is empty, so null-free chunks carry no
/// bitmap at all. Duplicate positions are harmless.
///
/// # Errors
/// `IndexOutOfBounds` if any position is `>= len`.
pub fn null_buffer_from_positions(
    len: usize,
    positions: &[usize],
) -> Result<Option<NullBuffer>, StrataError> {
    if positions.is_empty() {
        return Ok(None);
    }
    let mut validity = vec![true; len];
    for &pos in positions {
        let slot = validity
            .get_mut(pos)
            .ok_or(StrataError::IndexOutOfBounds { index: pos, len })?;
        *slot = false;
    }
    Ok(Some(NullBuffer::from(validity)))
}

/// Splits `Option` values into a dense buffer plus validity bitmap.
///
/// Null slots are filled with `T::default()`; readers must consult the bitmap
/// before trusting a slot.
pub fn split_options<T: Default>(values: Vec<Option<T>>) -> (Vec<T>, Option<NullBuffer>) {
    let mut any_null = false;
    let mut validity = Vec::with_capacity(values.len());
    let dense: Vec<T> = values
        .into_iter()
        .map(|v| {
            validity.push(v.is_some());
            any_null |= v.is_none();
            v.unwrap_or_default()
        })
        .collect();
    let nulls = any_null.then(|| NullBuffer::from(validity));
    (dense, nulls)
}
