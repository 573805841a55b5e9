//! Transposition.
//!
//! Output row `k` holds cell `k` of every input row. Short rows contribute
//! empty cells, so a ragged matrix comes out rectangular; from then on the
//! operation is its own inverse.

use crate::models::{width, Matrix, Row};

/// Turn rows into columns.
pub fn rows_to_columns(matrix: &[Row]) -> Matrix {
    (0..width(matrix))
        .map(|k| {
            matrix
                .iter()
                .map(|row| row.get(k).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Turn columns into rows. Same operation as [`rows_to_columns`].
pub fn columns_to_rows(matrix: &[Row]) -> Matrix {
    rows_to_columns(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matrix_of;

    #[test]
    fn test_rows_to_columns() {
        let m = matrix_of([["A", "B"], ["C", "D"], ["E", "F"]]);
        assert_eq!(rows_to_columns(&m), matrix_of([["A", "C", "E"], ["B", "D", "F"]]));
    }

    #[test]
    fn test_columns_to_rows_inverts() {
        let m = matrix_of([["A", "B"], ["C", "D"], ["E", "F"]]);
        assert_eq!(columns_to_rows(&rows_to_columns(&m)), m);
    }

    #[test]
    fn test_ragged_input_is_padded() {
        let m = matrix_of([vec!["a", "b", "c"], vec!["d"]]);
        let once = rows_to_columns(&m);
        assert_eq!(once, matrix_of([["a", "d"], ["b", ""], ["c", ""]]));

        // Not an exact inverse for ragged input, but stable after one round trip.
        let back = columns_to_rows(&once);
        assert_eq!(back, matrix_of([["a", "b", "c"], ["d", "", ""]]));
        assert_eq!(columns_to_rows(&rows_to_columns(&back)), back);
    }

    #[test]
    fn test_empty_matrix() {
        assert!(rows_to_columns(&[]).is_empty());
        assert!(rows_to_columns(&[Vec::new(), Vec::new()]).is_empty());
    }
}
