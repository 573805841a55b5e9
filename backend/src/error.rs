//! Error types for the Tabulate transformation stack.
//!
//! One error type per layer:
//!
//! - [`TransformError`] - matrix and record transformation errors (the core)
//! - [`InputError`] - reading and decoding raw input
//! - [`PipelineError`] - file processing orchestration
//! - [`ConfigError`] - environment configuration
//! - [`ServerError`] - HTTP API errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Axis
// =============================================================================

/// Which axis of a matrix a position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Column,
    Row,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Column => write!(f, "column"),
            Axis::Row => write!(f, "row"),
        }
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors raised by matrix and record transformations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A 1-based position was 0.
    #[error("Invalid {axis} position 0: positions start at 1")]
    ZeroPosition { axis: Axis },

    /// A position past the end of the matrix.
    #[error("{axis} {position} is out of range (matrix has {available} {axis}s)")]
    OutOfRange {
        axis: Axis,
        position: usize,
        available: usize,
    },

    /// A record whose key set differs from the first record's.
    #[error("Record {record} does not match the header {expected:?} (found {found:?})")]
    SchemaMismatch {
        record: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A field name that is not part of the header.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while reading or decoding raw input.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode the bytes.
    #[error("Failed to decode input as {encoding}")]
    EncodingError { encoding: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// File processing errors.
///
/// This is the error type returned by [`crate::transform::pipeline::process_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// A saved pipeline that is not valid JSON.
    #[error("Invalid pipeline definition: {0}")]
    Definition(#[from] serde_json::Error),

    /// Failed to write output.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
