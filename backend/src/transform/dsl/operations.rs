//! DSL Operations for table transformation
//!
//! Each operation is a configured transform: its parameters are fixed when
//! the value is built, and `apply` runs it on a matrix or a record list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TransformResult;
use crate::models::{Matrix, Record, Row};
use crate::transform::sort::SortDirection;
use crate::transform::{columns, records, rows, sort, transpose};

/// Matrix operations. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Exchange columns `n` and `m`
    SwapColumns { n: usize, m: usize },

    /// Remove column `n`
    DeleteColumn { n: usize },

    /// Insert a column after column `n`, one value per row (header first)
    InsertColumn {
        n: usize,
        #[serde(default)]
        values: Vec<String>,
    },

    /// Remove row `n`
    DeleteRow { n: usize },

    /// Insert a row after row `n`
    InsertRow {
        n: usize,
        #[serde(default)]
        values: Vec<String>,
    },

    /// Turn rows into columns
    Transpose,

    /// Sort data rows by column `col`, keeping the header
    SortByColumn {
        col: usize,
        #[serde(default)]
        direction: SortDirection,
    },
}

impl Operation {
    /// Apply this operation to a matrix
    pub fn apply(&self, matrix: &[Row]) -> TransformResult<Matrix> {
        match self {
            Operation::SwapColumns { n, m } => columns::swap_columns(matrix, *n, *m),
            Operation::DeleteColumn { n } => columns::delete_column(matrix, *n),
            Operation::InsertColumn { n, values } => columns::insert_column(matrix, *n, values),
            Operation::DeleteRow { n } => rows::delete_row(matrix, *n),
            Operation::InsertRow { n, values } => rows::insert_row(matrix, *n, values.clone()),
            Operation::Transpose => Ok(transpose::rows_to_columns(matrix)),
            Operation::SortByColumn { col, direction } => {
                sort::sort_by_column(matrix, *col, *direction)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::SwapColumns { n, m } => write!(f, "swap columns {} and {}", n, m),
            Operation::DeleteColumn { n } => write!(f, "delete column {}", n),
            Operation::InsertColumn { n, .. } => write!(f, "insert column after {}", n),
            Operation::DeleteRow { n } => write!(f, "delete row {}", n),
            Operation::InsertRow { n, .. } => write!(f, "insert row after {}", n),
            Operation::Transpose => write!(f, "transpose"),
            Operation::SortByColumn { col, direction } => {
                write!(f, "sort by column {} ({})", col, direction)
            }
        }
    }
}

/// Record operations. Positions are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordOperation {
    /// Exchange fields `a` and `b` in the field order
    SwapColumns { a: usize, b: usize },

    /// Remove record `index`
    DeleteRow { index: usize },

    /// Remove field `index`
    DeleteColumn { index: usize },

    /// Remove a field by name
    DeleteField { field: String },

    /// Sort records by field `column`
    Sort {
        column: usize,
        #[serde(default)]
        direction: SortDirection,
    },

    /// Transpose; the result is keyed by position with new ids
    Transpose,
}

impl RecordOperation {
    /// Apply this operation to a record list
    pub fn apply(&self, input: &[Record]) -> TransformResult<Vec<Record>> {
        match self {
            RecordOperation::SwapColumns { a, b } => records::swap_columns(input, *a, *b),
            RecordOperation::DeleteRow { index } => records::delete_row(input, *index),
            RecordOperation::DeleteColumn { index } => records::delete_column(input, *index),
            RecordOperation::DeleteField { field } => records::delete_field(input, field),
            RecordOperation::Sort { column, direction } => {
                records::sort_records(input, *column, *direction)
            }
            RecordOperation::Transpose => records::transpose(input),
        }
    }
}

impl fmt::Display for RecordOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordOperation::SwapColumns { a, b } => write!(f, "swap fields {} and {}", a, b),
            RecordOperation::DeleteRow { index } => write!(f, "delete record {}", index),
            RecordOperation::DeleteColumn { index } => write!(f, "delete field {}", index),
            RecordOperation::DeleteField { field } => write!(f, "delete field '{}'", field),
            RecordOperation::Sort { column, direction } => {
                write!(f, "sort by field {} ({})", column, direction)
            }
            RecordOperation::Transpose => write!(f, "transpose"),
        }
    }
}

/// Get a description of all available operations
pub fn operations_description() -> String {
    r#"Matrix operations (positions are 1-based):

| Operation | Description | Parameters |
|-----------|-------------|------------|
| swap_columns | Exchange two columns in every row | n, m |
| delete_column | Remove a column | n |
| insert_column | Insert a column after column n (0 = first) | n, values (header first) |
| delete_row | Remove a row | n |
| insert_row | Insert a row after row n (0 = first) | n, values |
| transpose | Turn rows into columns | - |
| sort_by_column | Sort rows below the header | col, direction: "asc" or "desc" |

Record operations (positions are 0-based):

| Operation | Description | Parameters |
|-----------|-------------|------------|
| swap_columns | Exchange two fields | a, b |
| delete_row | Remove a record | index |
| delete_column | Remove a field by position | index |
| delete_field | Remove a field by name | field |
| sort | Sort records, ids move with them | column, direction |
| transpose | Transpose, records get positional ids | - |

Example operations in JSON:
[
  {"type": "swap_columns", "n": 1, "m": 3},
  {"type": "delete_row", "n": 2},
  {"type": "sort_by_column", "col": 2, "direction": "desc"},
  {"type": "transpose"}
]"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matrix_of;
    use serde_json::json;

    #[test]
    fn test_operation_from_json() {
        let op: Operation = serde_json::from_value(json!({"type": "swap_columns", "n": 1, "m": 3}))
            .unwrap();
        assert_eq!(op, Operation::SwapColumns { n: 1, m: 3 });

        let op: Operation = serde_json::from_value(json!({"type": "sort_by_column", "col": 2}))
            .unwrap();
        assert_eq!(
            op,
            Operation::SortByColumn {
                col: 2,
                direction: SortDirection::Ascending
            }
        );
    }

    #[test]
    fn test_apply_swap() {
        let m = matrix_of([["A", "B", "C"], ["D", "E", "F"]]);
        let result = Operation::SwapColumns { n: 1, m: 3 }.apply(&m).unwrap();
        assert_eq!(result, matrix_of([["C", "B", "A"], ["F", "E", "D"]]));
    }

    #[test]
    fn test_apply_insert_column() {
        let m = matrix_of([["A"], ["B"]]);
        let op = Operation::InsertColumn {
            n: 1,
            values: vec!["h".into()],
        };
        assert_eq!(op.apply(&m).unwrap(), matrix_of([["A", "h"], ["B", ""]]));
    }

    #[test]
    fn test_record_operation_from_json() {
        let op: RecordOperation =
            serde_json::from_value(json!({"type": "sort", "column": 0, "direction": "desc"}))
                .unwrap();
        assert_eq!(
            op,
            RecordOperation::Sort {
                column: 0,
                direction: SortDirection::Descending
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::DeleteRow { n: 2 }.to_string(), "delete row 2");
        assert_eq!(
            RecordOperation::DeleteField { field: "age".into() }.to_string(),
            "delete field 'age'"
        );
    }
}
