//==================================================================================
// Unit Tests
//==================================================================================

use crate::error::StrataError;
use crate::null_handling::bitmap::*;

#[test]
fn test_positions_to_null_buffer() {
    let nulls = null_buffer_from_positions(4, &[1, 3]).unwrap().unwrap();
    assert_eq!(nulls.len(), 4);
    assert_eq!(nulls.null_count(), 2);
    assert!(nulls.is_valid(0));
    assert!(nulls.is_null(1));
    assert!(nulls.is_null(3));
}

#[test]
fn test_no_positions_means_no_bitmap() {
    assert!(null_buffer_from_positions(3, &[]).unwrap().is_none());
}

#[test]
fn test_position_out_of_range() {
    let result = null_buffer_from_positions(2, &[2]);
    assert!(matches!(
        result,
        Err(StrataError::IndexOutOfBounds { index: 2, len: 2 })
    ));
}

#[test]
fn test_split_options_with_nulls() {
    let (dense, nulls) = split_options(vec![Some(10i64), None, Some(30)]);
    // The null slot holds a placeholder, not a sentinel the reader relies on.
    assert_eq!(dense, vec![10, 0, 30]);
    let nulls = nulls.unwrap();
    assert!(nulls.is_null(1));
    assert_eq!(nulls.null_count(), 1);
}

#[test]
fn test_split_options_without_nulls() {
    let (dense, nulls) = split_options(vec![Some(true), Some(false)]);
    assert_eq!(dense, vec![true, false]);
    assert!(nulls.is_none());
}
