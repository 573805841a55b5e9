//! Markup output.
//!
//! [`to_markup_table`] renders a matrix as a `<table>` fragment for callers
//! to embed in their own documents; [`html_document`] is one such document.
//! Cell text is emitted verbatim: callers feeding untrusted input must
//! escape it themselves.

use crate::models::Row;

const TABLE_OPEN: &str = "<table>";
const TABLE_CLOSE: &str = "</table>";
const ROW_OPEN: &str = "<tr>";
const ROW_CLOSE: &str = "</tr>";
const CELL_OPEN: &str = "<td>";
const CELL_CLOSE: &str = "</td>";

const ROW_INDENT: &str = "    ";
const CELL_INDENT: &str = "      ";

fn render_row(row: &Row) -> String {
    let cells = row
        .iter()
        .map(|cell| format!("{CELL_INDENT}{CELL_OPEN}{cell}{CELL_CLOSE}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{ROW_INDENT}{ROW_OPEN}\n{cells}\n{ROW_INDENT}{ROW_CLOSE}")
}

/// Render a matrix as a table fragment.
///
/// ```
/// let html = tabulate::to_markup_table(&tabulate::parse("A,B"));
/// assert_eq!(html, "<table>\n    <tr>\n      <td>A</td>\n      <td>B</td>\n    </tr>\n</table>");
/// ```
pub fn to_markup_table(matrix: &[Row]) -> String {
    let rows = matrix.iter().map(render_row).collect::<Vec<_>>().join("\n");
    format!("{TABLE_OPEN}\n{rows}\n{TABLE_CLOSE}")
}

const DOCUMENT_STYLE: &str = r#"    body {
      font-family: Arial, sans-serif;
      margin: 20px;
      background-color: #f5f5f5;
    }
    table {
      border-collapse: collapse;
      width: 100%;
      max-width: 800px;
      margin: 0 auto;
      background-color: #fff;
    }
    td, th {
      border: 1px solid #ccc;
      padding: 8px;
      text-align: left;
    }
    tr:nth-child(even) {
      background-color: #eee;
    }"#;

/// Wrap a table fragment in a standalone styled HTML document.
pub fn html_document(table: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>{title}</title>\n  <style>\n{DOCUMENT_STYLE}\n  </style>\n</head>\n<body>\n{table}\n</body>\n</html>\n"
    )
}

/// Human-readable byte count: `0 B`, `512 B`, `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", size);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matrix_of;

    #[test]
    fn test_table_contains_cells() {
        let html = to_markup_table(&matrix_of([["A", "B"], ["C", "D"]]));
        assert!(html.starts_with("<table>"));
        assert!(html.contains("<tr>"));
        for cell in ["A", "B", "C", "D"] {
            assert!(html.contains(&format!("<td>{}</td>", cell)));
        }
    }

    #[test]
    fn test_table_layout() {
        let html = to_markup_table(&matrix_of([["A"], ["B"]]));
        let expected = "<table>\n    <tr>\n      <td>A</td>\n    </tr>\n    <tr>\n      <td>B</td>\n    </tr>\n</table>";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_cells_are_not_escaped() {
        let html = to_markup_table(&matrix_of([["<b>x</b> & y"]]));
        assert!(html.contains("<td><b>x</b> & y</td>"));
    }

    #[test]
    fn test_empty_matrix() {
        assert_eq!(to_markup_table(&[]), "<table>\n\n</table>");
    }

    #[test]
    fn test_document_wraps_table() {
        let doc = html_document("<table>\n</table>", "report");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>report</title>"));
        assert!(doc.contains("<body>\n<table>\n</table>\n</body>"));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }
}
