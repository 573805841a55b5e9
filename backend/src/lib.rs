//! # Tabulate - matrix transformations for delimited text
//!
//! Tabulate parses comma/newline delimited text into a matrix of strings,
//! reshapes it (swap, delete and insert columns or rows, transpose, sort by a
//! column while keeping the header in place) and writes it back out as text or
//! as a markup table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Raw text   │────▶│   Parser    │────▶│  Transform  │────▶│  CSV / HTML │
//! │  (any enc)  │     │  (matrix)   │     │ (ops, DSL)  │     │  (render)   │
//! └─────────────┘     └─────────────┘     └──────▲──────┘     └─────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │   Records   │
//!                                         │ (0-based,   │
//!                                         │  with ids)  │
//!                                         └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tabulate::{parse, serialize, sort_by_column, swap_columns, SortDirection};
//!
//! let matrix = parse("name,age\nAna,30\nBob,25");
//! let swapped = swap_columns(&matrix, 1, 2).unwrap();
//! let sorted = sort_by_column(&swapped, 1, SortDirection::Ascending).unwrap();
//! assert_eq!(serialize(&sorted), "age,name\n25,Bob\n30,Ana");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types, one per layer
//! - [`models`] - Matrix aliases, records and record ids
//! - [`parser`] - Text to matrix and back, encoding detection
//! - [`transform`] - Matrix transforms, record adapter, DSL and file pipeline
//! - [`render`] - Markup table and document rendering
//! - [`config`] - Server configuration from the environment
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Rendering
pub mod render;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    Axis, ConfigError, InputError, PipelineError, ServerError, TransformError, TransformResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Matrix, Record, RecordId, Row};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_bytes, decode_content, detect_encoding, normalize_line_endings, parse, read_input,
    serialize,
};

// =============================================================================
// Re-exports - Matrix transforms (1-based)
// =============================================================================

pub use transform::{
    columns_to_rows, delete_column, delete_row, insert_column, insert_row, rows_to_columns,
    sort_by_column, sort_permutation, swap_columns, SortDirection,
};

/// Record-level operations (0-based); names mirror the matrix transforms.
pub use transform::records;

// =============================================================================
// Re-exports - DSL
// =============================================================================

pub use transform::dsl::{
    compose, compose_all, example_pipeline, execute, execute_records, operations_description,
    Operation, OutputFormat, Pipeline, RecordOperation, Stage,
};

// =============================================================================
// Re-exports - Rendering
// =============================================================================

pub use render::{format_file_size, html_document, to_markup_table};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    default_output_path, load_pipeline, process_file, process_text, ProcessOptions,
    ProcessReport,
};

// =============================================================================
// Re-exports - Configuration and API
// =============================================================================

pub use api::types::{
    error_response, ExportFormat, ExportRequest, TransformRequest, TransformResponse,
    UploadMetadata, UploadResponse,
};
pub use config::ServerConfig;

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
