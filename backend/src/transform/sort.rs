//! Header-preserving sort by column value.
//!
//! Row 0 stays in place. Each compared pair of cells is compared numerically
//! when both parse as numbers, and as strings otherwise. In a column mixing
//! numbers and text this comparison is not transitive, so the rows are
//! ordered with a local merge sort: `slice::sort_by` may panic when the
//! comparator is not a total order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Axis, TransformResult};
use crate::models::{width, Matrix, Row};

use super::position_to_offset;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// Sort the data rows of `matrix` by column `col` (1-based).
///
/// Matrices with at most one row are returned unchanged.
pub fn sort_by_column(
    matrix: &[Row],
    col: usize,
    direction: SortDirection,
) -> TransformResult<Matrix> {
    if matrix.len() <= 1 {
        return Ok(matrix.to_vec());
    }

    let order = sort_permutation(matrix, col, direction)?;

    let mut sorted = Vec::with_capacity(matrix.len());
    sorted.push(matrix[0].clone());
    sorted.extend(order.into_iter().map(|i| matrix[i + 1].clone()));
    Ok(sorted)
}

/// Sorted order of the data rows, as 0-based indices into `matrix[1..]`.
pub fn sort_permutation(
    matrix: &[Row],
    col: usize,
    direction: SortDirection,
) -> TransformResult<Vec<usize>> {
    if matrix.len() <= 1 {
        return Ok(Vec::new());
    }

    let offset = position_to_offset(Axis::Column, col, width(matrix))?;
    let data = &matrix[1..];
    let key = |i: usize| data[i].get(offset).map(String::as_str).unwrap_or("");

    let mut order: Vec<usize> = (0..data.len()).collect();
    merge_sort_by(&mut order, |a, b| {
        let ordering = compare_cells(key(*a), key(*b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    Ok(order)
}

/// Compare two cells: numerically if both are numbers, else as strings.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

/// The whole cell (surrounding whitespace aside) as a number; NaN is text.
fn as_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Bottom-up stable merge sort. Terminates for any comparator.
fn merge_sort_by<T, F>(items: &mut Vec<T>, mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    let mut buffer = items.clone();
    let mut run = 1;

    while run < len {
        let mut start = 0;
        while start < len {
            let mid = (start + run).min(len);
            let end = (start + 2 * run).min(len);
            let (mut i, mut j, mut k) = (start, mid, start);

            while i < mid && j < end {
                // Ties take the left element, which keeps the sort stable.
                if compare(&items[j], &items[i]) == Ordering::Less {
                    buffer[k] = items[j];
                    j += 1;
                } else {
                    buffer[k] = items[i];
                    i += 1;
                }
                k += 1;
            }
            buffer[k..k + (mid - i)].copy_from_slice(&items[i..mid]);
            k += mid - i;
            buffer[k..k + (end - j)].copy_from_slice(&items[j..end]);

            start = end;
        }
        std::mem::swap(items, &mut buffer);
        run *= 2;
    }
}
