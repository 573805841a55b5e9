//! DSL Executor
//!
//! Runs operation lists left to right. The first failing operation aborts
//! the run; later operations never see a partial result.

use crate::error::TransformResult;
use crate::models::{Matrix, Record, Row};

use super::operations::{Operation, RecordOperation};

/// Apply `operations` to `matrix` in order.
pub fn execute(matrix: &[Row], operations: &[Operation]) -> TransformResult<Matrix> {
    operations
        .iter()
        .try_fold(matrix.to_vec(), |current, op| op.apply(&current))
}

/// Apply record `operations` to `records` in order.
pub fn execute_records(
    records: &[Record],
    operations: &[RecordOperation],
) -> TransformResult<Vec<Record>> {
    operations
        .iter()
        .try_fold(records.to_vec(), |current, op| op.apply(&current))
}

/// Compose two fallible stages left to right: `first`, then `second`.
///
/// Longer chains nest: `compose(compose(f, g), h)`.
///
/// ```
/// use tabulate::{compose, parse, serialize, swap_columns, Matrix, TransformError};
///
/// let transform = compose(
///     compose(
///         |text: &str| Ok::<_, TransformError>(parse(text)),
///         |matrix: Matrix| swap_columns(&matrix, 1, 2),
///     ),
///     |matrix: Matrix| Ok(serialize(&matrix)),
/// );
/// assert_eq!(transform("A,B\nC,D"), Ok("B,A\nD,C".to_string()));
/// ```
pub fn compose<A, B, C, E, F, G>(first: F, second: G) -> impl Fn(A) -> Result<C, E>
where
    F: Fn(A) -> Result<B, E>,
    G: Fn(B) -> Result<C, E>,
{
    move |input| first(input).and_then(&second)
}

/// A boxed stage for [`compose_all`].
pub type Stage<'a, T, E> = Box<dyn Fn(T) -> Result<T, E> + 'a>;

/// Compose any number of same-typed stages left to right.
///
/// The first error stops the chain. No stages gives the identity.
///
/// ```
/// use tabulate::{compose_all, delete_row, swap_columns, Matrix, Stage, TransformError};
///
/// let stages: Vec<Stage<Matrix, TransformError>> = vec![
///     Box::new(|m: Matrix| swap_columns(&m, 1, 2)),
///     Box::new(|m: Matrix| delete_row(&m, 2)),
/// ];
/// let transform = compose_all(stages);
/// let matrix = tabulate::parse("A,B\nC,D\nE,F");
/// assert_eq!(tabulate::serialize(&transform(matrix).unwrap()), "B,A\nF,E");
/// ```
pub fn compose_all<'a, T, E>(stages: Vec<Stage<'a, T, E>>) -> impl Fn(T) -> Result<T, E> + 'a
where
    T: 'a,
    E: 'a,
{
    move |input| stages.iter().try_fold(input, |current, stage| stage(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::models::matrix_of;
    use crate::parser::{parse, serialize};
    use crate::transform::columns::swap_columns;
    use std::cell::Cell;

    #[test]
    fn test_execute_in_order() {
        let m = matrix_of([["A", "B", "C"], ["D", "E", "F"], ["G", "H", "I"]]);
        let ops = vec![
            Operation::SwapColumns { n: 1, m: 3 },
            Operation::DeleteRow { n: 2 },
            Operation::Transpose,
        ];
        let result = execute(&m, &ops).unwrap();
        assert_eq!(result, matrix_of([["C", "I"], ["B", "H"], ["A", "G"]]));
    }

    #[test]
    fn test_execute_empty_list_is_identity() {
        let m = matrix_of([["x"]]);
        assert_eq!(execute(&m, &[]).unwrap(), m);
    }

    #[test]
    fn test_execute_stops_at_failure() {
        let m = matrix_of([["A", "B"]]);
        let ops = vec![Operation::DeleteColumn { n: 5 }, Operation::Transpose];
        assert!(matches!(
            execute(&m, &ops),
            Err(TransformError::OutOfRange { position: 5, .. })
        ));
    }

    #[test]
    fn test_execute_records() {
        let records = vec![
            Record::with_id("x").field("a", "2").field("b", "p"),
            Record::with_id("y").field("a", "1").field("b", "q"),
        ];
        let ops = vec![
            RecordOperation::Sort {
                column: 0,
                direction: Default::default(),
            },
            RecordOperation::DeleteField { field: "a".into() },
        ];
        let result = execute_records(&records, &ops).unwrap();
        assert_eq!(result[0], Record::with_id("y").field("b", "q"));
    }

    #[test]
    fn test_compose_csv_pipeline() {
        let transform = compose(
            compose(
                |text: &str| Ok::<_, TransformError>(parse(text)),
                |matrix: Matrix| swap_columns(&matrix, 1, 2),
            ),
            |matrix: Matrix| Ok(serialize(&matrix)),
        );
        assert_eq!(transform("A,B\nC,D").unwrap(), "B,A\nD,C");
    }

    #[test]
    fn test_compose_all_runs_in_order() {
        let stages: Vec<Stage<Matrix, TransformError>> = vec![
            Box::new(|m: Matrix| swap_columns(&m, 1, 3)),
            Box::new(|m: Matrix| Ok(crate::transform::transpose::rows_to_columns(&m))),
            Box::new(|m: Matrix| crate::transform::rows::delete_row(&m, 1)),
        ];
        let transform = compose_all(stages);
        let result = transform(matrix_of([["A", "B", "C"], ["D", "E", "F"]])).unwrap();
        assert_eq!(result, matrix_of([["B", "E"], ["A", "D"]]));
    }

    #[test]
    fn test_compose_all_empty_is_identity() {
        let transform = compose_all::<Matrix, TransformError>(Vec::new());
        assert_eq!(transform(matrix_of([["x"]])).unwrap(), matrix_of([["x"]]));
    }

    #[test]
    fn test_compose_all_short_circuits() {
        let later_runs = Cell::new(0);
        let stages: Vec<Stage<Matrix, TransformError>> = vec![
            Box::new(|m: Matrix| swap_columns(&m, 1, 9)),
            Box::new(|m: Matrix| {
                later_runs.set(later_runs.get() + 1);
                Ok(m)
            }),
        ];
        let transform = compose_all(stages);
        assert!(transform(matrix_of([["a"]])).is_err());
        assert_eq!(later_runs.get(), 0);
    }

    #[test]
    fn test_compose_short_circuits() {
        let later_runs = Cell::new(0);
        let transform = compose(
            |matrix: Matrix| swap_columns(&matrix, 1, 9),
            |matrix: Matrix| {
                later_runs.set(later_runs.get() + 1);
                Ok(matrix)
            },
        );
        assert!(transform(matrix_of([["a"]])).is_err());
        assert_eq!(later_runs.get(), 0);
    }
}
