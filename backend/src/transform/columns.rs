//! Column transforms: swap, delete, insert.
//!
//! Positions are 1-based and checked against the matrix width.

use crate::error::{Axis, TransformResult};
use crate::models::{width, Matrix, Row};

use super::{insertion_offset, position_to_offset};

/// Exchange columns `n` and `m` in every row.
///
/// A row too short to hold both cells is padded with empty cells first.
pub fn swap_columns(matrix: &[Row], n: usize, m: usize) -> TransformResult<Matrix> {
    let available = width(matrix);
    let a = position_to_offset(Axis::Column, n, available)?;
    let b = position_to_offset(Axis::Column, m, available)?;

    if a == b {
        return Ok(matrix.to_vec());
    }

    let needed = a.max(b) + 1;
    Ok(matrix
        .iter()
        .map(|row| {
            let mut row = row.clone();
            if row.len() < needed {
                row.resize(needed, String::new());
            }
            row.swap(a, b);
            row
        })
        .collect())
}

/// Remove column `n` from every row. Rows without that cell are left as-is.
pub fn delete_column(matrix: &[Row], n: usize) -> TransformResult<Matrix> {
    let offset = position_to_offset(Axis::Column, n, width(matrix))?;

    Ok(matrix
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(i, _)| *i != offset)
                .map(|(_, cell)| cell.clone())
                .collect()
        })
        .collect())
}

/// Insert a column after column `n` (0 inserts it first).
///
/// Row `i` receives `values[i]`, or an empty cell when `values` is shorter
/// than the matrix. `values[0]` lands in the header row.
pub fn insert_column(matrix: &[Row], n: usize, values: &[String]) -> TransformResult<Matrix> {
    let offset = insertion_offset(Axis::Column, n, width(matrix))?;

    Ok(matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut row = row.clone();
            if row.len() < offset {
                row.resize(offset, String::new());
            }
            row.insert(offset, values.get(i).cloned().unwrap_or_default());
            row
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::models::matrix_of;

    fn sample() -> Matrix {
        matrix_of([["A", "B", "C"], ["D", "E", "F"]])
    }

    #[test]
    fn test_swap_first_and_last() {
        let result = swap_columns(&sample(), 1, 3).unwrap();
        assert_eq!(result, matrix_of([["C", "B", "A"], ["F", "E", "D"]]));
    }

    #[test]
    fn test_swap_is_an_involution() {
        let m = sample();
        let twice = swap_columns(&swap_columns(&m, 2, 3).unwrap(), 2, 3).unwrap();
        assert_eq!(twice, m);
    }

    #[test]
    fn test_swap_does_not_touch_input() {
        let m = sample();
        let _ = swap_columns(&m, 1, 2).unwrap();
        assert_eq!(m, sample());
    }

    #[test]
    fn test_swap_pads_short_rows() {
        let m = matrix_of([vec!["a", "b", "c"], vec!["d"]]);
        let result = swap_columns(&m, 1, 3).unwrap();
        assert_eq!(result, matrix_of([vec!["c", "b", "a"], vec!["", "", "d"]]));
    }

    #[test]
    fn test_swap_out_of_range() {
        let err = swap_columns(&sample(), 1, 4).unwrap_err();
        assert_eq!(
            err,
            TransformError::OutOfRange {
                axis: Axis::Column,
                position: 4,
                available: 3
            }
        );
        assert!(matches!(
            swap_columns(&sample(), 0, 1),
            Err(TransformError::ZeroPosition { .. })
        ));
    }

    #[test]
    fn test_delete_middle_column() {
        let result = delete_column(&sample(), 2).unwrap();
        assert_eq!(result, matrix_of([["A", "C"], ["D", "F"]]));
    }

    #[test]
    fn test_delete_leaves_short_rows() {
        let m = matrix_of([vec!["a", "b", "c"], vec!["d"]]);
        let result = delete_column(&m, 3).unwrap();
        assert_eq!(result, matrix_of([vec!["a", "b"], vec!["d"]]));
    }

    #[test]
    fn test_delete_out_of_range() {
        assert!(delete_column(&sample(), 4).is_err());
        assert!(delete_column(&[], 1).is_err());
    }

    #[test]
    fn test_insert_after_first_column() {
        let values = vec!["X".to_string(), "Y".to_string()];
        let result = insert_column(&sample(), 1, &values).unwrap();
        assert_eq!(result, matrix_of([["A", "X", "B", "C"], ["D", "Y", "E", "F"]]));
    }

    #[test]
    fn test_insert_front_and_missing_values() {
        let values = vec!["h".to_string()];
        let result = insert_column(&sample(), 0, &values).unwrap();
        assert_eq!(result, matrix_of([["h", "A", "B", "C"], ["", "D", "E", "F"]]));
    }

    #[test]
    fn test_insert_then_delete_restores() {
        let values = vec!["X".to_string(), "Y".to_string()];
        let inserted = insert_column(&sample(), 3, &values).unwrap();
        assert_eq!(delete_column(&inserted, 4).unwrap(), sample());
    }

    #[test]
    fn test_insert_past_width() {
        assert!(insert_column(&sample(), 4, &[]).is_err());
    }
}
