//! Row transforms: delete, insert. Positions are 1-based.

use crate::error::{Axis, TransformResult};
use crate::models::{Matrix, Row};

use super::{insertion_offset, position_to_offset};

/// Remove row `n`.
pub fn delete_row(matrix: &[Row], n: usize) -> TransformResult<Matrix> {
    let offset = position_to_offset(Axis::Row, n, matrix.len())?;

    Ok(matrix
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != offset)
        .map(|(_, row)| row.clone())
        .collect())
}

/// Insert `values` as a new row after row `n` (0 inserts it first).
pub fn insert_row(matrix: &[Row], n: usize, values: Row) -> TransformResult<Matrix> {
    let offset = insertion_offset(Axis::Row, n, matrix.len())?;

    let mut result = matrix.to_vec();
    result.insert(offset, values);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matrix_of;

    fn sample() -> Matrix {
        matrix_of([["A", "B", "C"], ["D", "E", "F"], ["G", "H", "I"]])
    }

    #[test]
    fn test_delete_second_row() {
        let result = delete_row(&sample(), 2).unwrap();
        assert_eq!(result, matrix_of([["A", "B", "C"], ["G", "H", "I"]]));
    }

    #[test]
    fn test_delete_row_bounds() {
        assert!(delete_row(&sample(), 0).is_err());
        assert!(delete_row(&sample(), 4).is_err());
        assert_eq!(delete_row(&sample(), 3).unwrap().len(), 2);
    }

    #[test]
    fn test_insert_after_first_row() {
        let row = vec!["X".to_string(), "Y".to_string(), "Z".to_string()];
        let result = insert_row(&sample(), 1, row).unwrap();
        assert_eq!(
            result,
            matrix_of([
                ["A", "B", "C"],
                ["X", "Y", "Z"],
                ["D", "E", "F"],
                ["G", "H", "I"]
            ])
        );
    }

    #[test]
    fn test_insert_append_and_prepend() {
        let appended = insert_row(&sample(), 3, vec!["end".to_string()]).unwrap();
        assert_eq!(appended[3], vec!["end"]);

        let prepended = insert_row(&sample(), 0, vec!["top".to_string()]).unwrap();
        assert_eq!(prepended[0], vec!["top"]);
        assert!(insert_row(&sample(), 4, Vec::new()).is_err());
    }

    #[test]
    fn test_insert_then_delete_restores() {
        let inserted = insert_row(&sample(), 2, vec!["new".to_string()]).unwrap();
        assert_eq!(delete_row(&inserted, 3).unwrap(), sample());
    }
}
