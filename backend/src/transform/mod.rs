//! Transformation module.
//!
//! - Matrix transforms: [`columns`], [`rows`], [`transpose`], [`sort`] (1-based positions)
//! - Records: adapter between matrices and keyed records (0-based positions)
//! - DSL: configured operations, composition and execution
//! - Pipeline: file processing driven by command-line style options
//!
//! Every transform takes its input by reference and returns a new value.
//!
//! Matrices may be ragged. Column positions are checked against the width
//! (longest row); a row lacking the addressed cell reads as empty there.

pub mod columns;
pub mod dsl;
pub mod pipeline;
pub mod records;
pub mod rows;
pub mod sort;
pub mod transpose;

pub use columns::{delete_column, insert_column, swap_columns};
pub use dsl::*;
pub use rows::{delete_row, insert_row};
pub use sort::{sort_by_column, sort_permutation, SortDirection};
pub use transpose::{columns_to_rows, rows_to_columns};

use crate::error::{Axis, TransformError, TransformResult};

/// Check a 1-based position against `available` entries and return its 0-based offset.
pub(crate) fn position_to_offset(
    axis: Axis,
    position: usize,
    available: usize,
) -> TransformResult<usize> {
    if position == 0 {
        return Err(TransformError::ZeroPosition { axis });
    }
    if position > available {
        return Err(TransformError::OutOfRange {
            axis,
            position,
            available,
        });
    }
    Ok(position - 1)
}

/// Check an "insert after position" argument: 0 inserts first, `available` appends.
pub(crate) fn insertion_offset(
    axis: Axis,
    position: usize,
    available: usize,
) -> TransformResult<usize> {
    if position > available {
        return Err(TransformError::OutOfRange {
            axis,
            position,
            available,
        });
    }
    Ok(position)
}
