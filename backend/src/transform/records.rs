//! Adapter between matrices and keyed records.
//!
//! ```text
//! records                         matrix                     ids_by_row
//! {id: 7, name: Ana, age: 30}  →  [name, age]   (header)
//! {id: 9, name: Bob, age: 25}     [Ana,  30 ]             →  [7, 9]
//!                                 [Bob,  25 ]
//! ```
//!
//! Record-level operations take **0-based** positions (column `i` is the
//! `i`-th field, row `i` is the `i`-th record) and translate them to the
//! 1-based matrix transforms here, and nowhere else. Ids travel with their
//! rows through deletes and sorts; only [`transpose`] assigns new ones.

use crate::error::{Axis, TransformError, TransformResult};
use crate::models::{Matrix, Record, RecordId, Row};
use crate::parser::parse;

use super::sort::{sort_permutation, SortDirection};
use super::{columns, position_to_offset, rows, transpose as matrix_transpose};

/// Rows above the first record in a matrix built from records.
const HEADER_ROWS: usize = 1;

/// A matrix built from records, with each data row's original id.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMatrix {
    /// Header row followed by one row per record.
    pub matrix: Matrix,
    /// Id of the record behind data row `i` (matrix row `i + 1`).
    pub ids_by_row: Vec<Option<RecordId>>,
}

/// 0-based record position to 1-based matrix position.
fn one_based(index: usize) -> usize {
    index + 1
}

/// Field names of a record list: the keys of its first record.
pub fn header_of(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|r| r.keys().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Build a header row plus one row per record.
///
/// Every record must carry exactly the first record's fields, in any order.
pub fn matrix_from_records(records: &[Record]) -> TransformResult<RecordMatrix> {
    if records.is_empty() {
        return Ok(RecordMatrix {
            matrix: vec![Vec::new()],
            ids_by_row: Vec::new(),
        });
    }

    let header = header_of(records);
    let mut matrix = Vec::with_capacity(records.len() + HEADER_ROWS);
    let mut ids_by_row = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let matches = record.len() == header.len()
            && header.iter().all(|h| record.get(h).is_some());
        if !matches {
            return Err(TransformError::SchemaMismatch {
                record: i,
                expected: header,
                found: record.keys().map(str::to_string).collect(),
            });
        }

        ids_by_row.push(record.id.clone());
        matrix.push(
            header
                .iter()
                .map(|h| record.get(h).unwrap_or_default().to_string())
                .collect(),
        );
    }

    matrix.insert(0, header);
    Ok(RecordMatrix { matrix, ids_by_row })
}

/// Read row 0 as field names and every other row as a record.
///
/// Row `i` gets id `ids_by_row[i - 1]`, or `i - 1` when none was recorded.
/// Missing cells become empty strings.
pub fn records_from_matrix(matrix: &[Row], ids_by_row: &[Option<RecordId>]) -> Vec<Record> {
    if matrix.len() <= HEADER_ROWS {
        return Vec::new();
    }

    let header = &matrix[0];
    matrix[HEADER_ROWS..]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let id = ids_by_row
                .get(i)
                .cloned()
                .flatten()
                .unwrap_or(RecordId::from(i));

            let mut record = Record::with_id(id);
            for (offset, name) in header.iter().enumerate() {
                record.insert(name.as_str(), row.get(offset).cloned().unwrap_or_default());
            }
            record
        })
        .collect()
}

/// Read a transposed matrix: every row is a record keyed by column position.
///
/// A transposed matrix has no meaningful header, so ids are the row
/// positions and field names are `"0"`, `"1"`, ...
pub fn transposed_records_from_matrix(matrix: &[Row]) -> Vec<Record> {
    matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut record = Record::with_id(i);
            for (offset, value) in row.iter().enumerate() {
                record.insert(offset.to_string(), value.as_str());
            }
            record
        })
        .collect()
}

/// Parse delimited text into records with positional ids.
pub fn records_from_csv(text: &str) -> Vec<Record> {
    records_from_matrix(&parse(text), &[])
}

/// Export records as delimited text with every value double-quoted.
///
/// The header line stays unquoted; `"` inside values is doubled.
pub fn records_to_csv(records: &[Record]) -> TransformResult<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let RecordMatrix { matrix, .. } = matrix_from_records(records)?;
    let mut lines = Vec::with_capacity(matrix.len());
    lines.push(matrix[0].join(","));
    for row in &matrix[HEADER_ROWS..] {
        let quoted: Vec<String> = row
            .iter()
            .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
            .collect();
        lines.push(quoted.join(","));
    }
    Ok(lines.join("\n"))
}

// =============================================================================
// Record-level operations (0-based)
// =============================================================================

/// Swap fields `a` and `b` (0-based) in the canonical field order.
pub fn swap_columns(records: &[Record], a: usize, b: usize) -> TransformResult<Vec<Record>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let rm = matrix_from_records(records)?;
    let swapped = columns::swap_columns(&rm.matrix, one_based(a), one_based(b))?;
    Ok(records_from_matrix(&swapped, &rm.ids_by_row))
}

/// Remove the record at `index` (0-based). The others keep their ids.
///
/// Index 0 is the first record under the header. The header row itself is
/// never removed, so every remaining record keeps its field names.
pub fn delete_row(records: &[Record], index: usize) -> TransformResult<Vec<Record>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let position = one_based(index);
    position_to_offset(Axis::Row, position, records.len())?;

    let mut rm = matrix_from_records(records)?;
    let remaining = rows::delete_row(&rm.matrix, position + HEADER_ROWS)?;
    rm.ids_by_row.remove(index);
    Ok(records_from_matrix(&remaining, &rm.ids_by_row))
}

/// Remove field `index` (0-based) from every record.
pub fn delete_column(records: &[Record], index: usize) -> TransformResult<Vec<Record>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let rm = matrix_from_records(records)?;
    let trimmed = columns::delete_column(&rm.matrix, one_based(index))?;
    Ok(records_from_matrix(&trimmed, &rm.ids_by_row))
}

/// Remove a field by name from every record.
pub fn delete_field(records: &[Record], field: &str) -> TransformResult<Vec<Record>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let index = header_of(records)
        .iter()
        .position(|h| h == field)
        .ok_or_else(|| TransformError::UnknownField(field.to_string()))?;
    delete_column(records, index)
}

/// Sort records by field `column` (0-based). Ids move with their records.
pub fn sort_records(
    records: &[Record],
    column: usize,
    direction: SortDirection,
) -> TransformResult<Vec<Record>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let rm = matrix_from_records(records)?;
    let order = sort_permutation(&rm.matrix, one_based(column), direction)?;

    let mut sorted = Vec::with_capacity(rm.matrix.len());
    sorted.push(rm.matrix[0].clone());
    sorted.extend(order.iter().map(|&i| rm.matrix[i + HEADER_ROWS].clone()));
    let ids: Vec<Option<RecordId>> = order.iter().map(|&i| rm.ids_by_row[i].clone()).collect();

    Ok(records_from_matrix(&sorted, &ids))
}

/// Transpose the records' matrix, header row included.
///
/// The result is keyed by column position with fresh positional ids.
pub fn transpose(records: &[Record]) -> TransformResult<Vec<Record>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let rm = matrix_from_records(records)?;
    Ok(transposed_records_from_matrix(&matrix_transpose::rows_to_columns(
        &rm.matrix,
    )))
}
