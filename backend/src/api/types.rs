//! Request and response bodies for the HTTP API.
//!
//! Records travel as JSON objects with `id` first and every other field as a
//! string, in header order.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{PipelineError, ServerError, TransformResult};
use crate::models::Record;
use crate::parser::{normalize_line_endings, DecodedInput};
use crate::render::{format_file_size, html_document, to_markup_table};
use crate::transform::dsl::RecordOperation;
use crate::transform::records::{header_of, matrix_from_records, records_from_csv, records_to_csv};

/// Response sent after an upload has been decoded and parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Status: "ready" or "empty"
    pub status: String,

    /// One record per data row, ids are row positions
    pub records: Vec<Record>,

    pub metadata: UploadMetadata,
}

/// What we learned about the uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub file_name: Option<String>,
    pub encoding: String,
    pub row_count: usize,
    pub columns: Vec<String>,
    /// Human-readable size, e.g. "1.5 KB"
    pub size: String,
    pub size_bytes: u64,
}

impl UploadResponse {
    /// Build the response for a decoded upload.
    ///
    /// Windows line endings are normalized and trailing blank lines dropped,
    /// so they don't turn into an empty last record.
    pub fn from_decoded(file_name: Option<String>, size_bytes: u64, decoded: DecodedInput) -> Self {
        let records = records_from_csv(&normalize_line_endings(&decoded.text));
        let columns = header_of(&records);

        UploadResponse {
            job_id: Uuid::new_v4().to_string(),
            status: if records.is_empty() { "empty" } else { "ready" }.to_string(),
            metadata: UploadMetadata {
                file_name,
                encoding: decoded.encoding,
                row_count: records.len(),
                columns,
                size: format_file_size(size_bytes),
                size_bytes,
            },
            records,
        }
    }
}

/// Body of `POST /api/transform`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformRequest {
    pub records: Vec<Record>,
    /// Applied left to right
    #[serde(default)]
    pub operations: Vec<RecordOperation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResponse {
    pub records: Vec<Record>,
    pub columns: Vec<String>,
    pub operations_applied: usize,
}

/// Export target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Header line plus double-quoted values
    #[default]
    Csv,
    /// Markup table fragment
    Html,
    /// Standalone document around the table
    HtmlDocument,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Html | ExportFormat::HtmlDocument => "text/html; charset=utf-8",
        }
    }
}

/// Body of `POST /api/export`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub records: Vec<Record>,
    #[serde(default)]
    pub format: ExportFormat,
    /// Document title for `html_document`
    #[serde(default)]
    pub title: Option<String>,
}

impl ExportRequest {
    /// Render the records in the requested format.
    pub fn render(&self) -> TransformResult<String> {
        match self.format {
            ExportFormat::Csv => records_to_csv(&self.records),
            ExportFormat::Html => Ok(to_markup_table(&matrix_from_records(&self.records)?.matrix)),
            ExportFormat::HtmlDocument => {
                let table = to_markup_table(&matrix_from_records(&self.records)?.matrix);
                Ok(html_document(&table, self.title.as_deref().unwrap_or("Table")))
            }
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "records": [],
    })
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Transform(_) | ServerError::Pipeline(PipelineError::Transform(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServerError::BadRequest(_)
            | ServerError::Pipeline(PipelineError::Input(_))
            | ServerError::Pipeline(PipelineError::Definition(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(error_response(&self.to_string()))).into_response()
    }
}
