//! File processing pipeline.
//!
//! Turns command-line style options into a [`Pipeline`], then reads the input
//! file (with encoding detection), applies the operations and writes the
//! rendered output next to the input unless a path is given.
//!
//! # Example
//!
//! ```rust,ignore
//! use tabulate::{process_file, ProcessOptions};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ProcessOptions {
//!         swap: Some((1, 3)),
//!         to_html: true,
//!         ..Default::default()
//!     };
//!     let report = process_file(Path::new("catalog.csv"), &options).await?;
//!     println!("Wrote {}", report.output.display());
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::api::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::error::{InputError, PipelineResult, TransformResult};
use crate::models::Row;
use crate::parser::{parse, read_input, serialize};
use crate::render::{format_file_size, html_document, to_markup_table};
use crate::transform::dsl::{Operation, OutputFormat, Pipeline};
use crate::transform::sort::SortDirection;

/// Options for processing one file
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Swap these two columns (1-based)
    pub swap: Option<(usize, usize)>,

    /// Delete this row (1-based)
    pub delete_row: Option<usize>,

    /// Delete this column (1-based)
    pub delete_column: Option<usize>,

    /// Sort data rows by this column (1-based)
    pub sort: Option<usize>,

    /// Sort descending instead of ascending
    pub descending: bool,

    /// Transpose last
    pub transpose: bool,

    /// Render a markup table instead of delimited text
    pub to_html: bool,

    /// Wrap the markup table in a standalone document
    pub document: bool,

    /// Output path (default: derived from the input path)
    pub output: Option<PathBuf>,

    /// Saved pipeline used instead of the individual flags
    pub pipeline: Option<Pipeline>,
}

impl ProcessOptions {
    /// Build the pipeline these options describe.
    ///
    /// Stages run in a fixed order: swap, delete row, delete column, sort,
    /// transpose. A saved pipeline replaces the stage flags, though
    /// `to_html` still forces markup output.
    pub fn to_pipeline(&self) -> Pipeline {
        let mut pipeline = match &self.pipeline {
            Some(saved) => saved.clone(),
            None => self.flag_pipeline(),
        };
        if self.to_html {
            pipeline.output = OutputFormat::Html;
        }
        pipeline
    }

    fn flag_pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        if let Some((n, m)) = self.swap {
            pipeline = pipeline.then(Operation::SwapColumns { n, m });
        }
        if let Some(n) = self.delete_row {
            pipeline = pipeline.then(Operation::DeleteRow { n });
        }
        if let Some(n) = self.delete_column {
            pipeline = pipeline.then(Operation::DeleteColumn { n });
        }
        if let Some(col) = self.sort {
            let direction = if self.descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            pipeline = pipeline.then(Operation::SortByColumn { col, direction });
        }
        if self.transpose {
            pipeline = pipeline.then(Operation::Transpose);
        }
        pipeline
    }
}

/// Summary of a processed file
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoding: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub operations: usize,
    pub bytes_written: u64,
}

/// Derive the output path: `<dir>/<stem>_processed.csv`, or `.html` for markup.
pub fn default_output_path(input: &Path, to_html: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = if to_html { "html" } else { "csv" };
    input.with_file_name(format!("{}_processed.{}", stem, extension))
}

/// Load a saved pipeline from a JSON file.
pub async fn load_pipeline(path: &Path) -> PipelineResult<Pipeline> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(InputError::from)?;
    Ok(Pipeline::from_json(&json)?)
}

/// Run `pipeline` over `text` and render its output.
///
/// With a `document_title`, markup output is wrapped in a full document.
pub fn process_text(
    text: &str,
    pipeline: &Pipeline,
    document_title: Option<&str>,
) -> TransformResult<String> {
    let matrix = pipeline.apply(&parse(text))?;
    Ok(render(&matrix, pipeline.output, document_title))
}

fn render(matrix: &[Row], output: OutputFormat, document_title: Option<&str>) -> String {
    match (output, document_title) {
        (OutputFormat::Csv, _) => serialize(matrix),
        (OutputFormat::Html, None) => to_markup_table(matrix),
        (OutputFormat::Html, Some(title)) => html_document(&to_markup_table(matrix), title),
    }
}

/// Split off one final line break so it doesn't parse as an empty last row.
fn split_final_newline(text: &str) -> (String, bool) {
    let mut text = text.replace("\r\n", "\n");
    let had_newline = text.ends_with('\n');
    if had_newline {
        text.pop();
    }
    (text, had_newline)
}

/// Process one file end to end.
///
/// 1. Reads and decodes the input
/// 2. Applies the configured operations
/// 3. Renders delimited text or markup
/// 4. Writes the result
pub async fn process_file(input: &Path, options: &ProcessOptions) -> PipelineResult<ProcessReport> {
    log_info(format!("📖 Reading {}...", input.display()));
    let decoded = read_input(input).await?;
    log_success(format!("Detected encoding: {}", decoded.encoding));

    let (body, final_newline) = split_final_newline(&decoded.text);
    let table = parse(&body);
    let rows_in = table.len();
    log_success(format!("Read {} rows", rows_in));

    let pipeline = options.to_pipeline();
    if pipeline.is_empty() {
        log_warning("No operations requested, output mirrors input");
    } else {
        log_info(format!("⚙️  Applying {} operation(s)...", pipeline.operations.len()));
        for op in &pipeline.operations {
            log_info_indent(op.to_string(), 1);
        }
    }

    let title = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Table");
    let document_title = (options.document && pipeline.output == OutputFormat::Html).then_some(title);
    if options.document && document_title.is_none() {
        log_warning("--document only applies to markup output, ignoring");
    }

    let matrix = pipeline.apply(&table)?;
    let rows_out = matrix.len();
    let mut rendered = render(&matrix, pipeline.output, document_title);
    if final_newline && pipeline.output == OutputFormat::Csv {
        rendered.push('\n');
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input, pipeline.output == OutputFormat::Html));
    tokio::fs::write(&output, &rendered).await?;
    let bytes_written = rendered.len() as u64;
    log_success(format!(
        "💾 Wrote {} ({})",
        output.display(),
        format_file_size(bytes_written)
    ));

    Ok(ProcessReport {
        input: input.to_path_buf(),
        output,
        encoding: decoded.encoding,
        rows_in,
        rows_out,
        operations: pipeline.operations.len(),
        bytes_written,
    })
}
