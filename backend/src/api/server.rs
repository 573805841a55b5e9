//! HTTP server for the Tabulate API.
//!
//! Uploads are parsed into records; the browser then sends records back with
//! the operations to apply, and finally asks for an export.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/upload`     | Upload a CSV file, get records back  |
//! | POST   | `/api/transform`  | Apply record operations              |
//! | POST   | `/api/export`     | Render records as CSV or HTML        |
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::{header, Method},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, log_info_indent, log_success, LOG_BROADCASTER};
use super::types::{ExportRequest, TransformRequest, TransformResponse, UploadResponse};
use crate::config::ServerConfig;
use crate::error::{PipelineError, ServerError, ServerResult};
use crate::parser::decode_bytes;
use crate::render::format_file_size;
use crate::transform::dsl::execute_records;
use crate::transform::records::header_of;

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    // Permissive CORS for the browser UI
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/upload", post(upload_csv))
        .route("/api/transform", post(transform_records))
        .route("/api/export", post(export_records))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let addr = config.socket_addr();
    let app = router(&config);

    println!("🚀 Tabulate server running on http://{}", addr);
    println!("   POST /api/upload    - Upload CSV file");
    println!("   POST /api/transform - Apply record operations");
    println!("   POST /api/export    - Export records as CSV or HTML");
    println!("   GET  /api/logs      - SSE log stream");
    println!("   GET  /health        - Health check");
    println!(
        "   Upload limit: {}",
        format_file_size(config.max_upload_bytes as u64)
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tabulate",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "transform": "POST /api/transform",
            "export": "POST /api/export",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers skip the entries they missed.
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Upload CSV endpoint
async fn upload_csv(mut multipart: Multipart) -> ServerResult<Json<UploadResponse>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            file_data = Some(bytes.to_vec());
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".into()))?;
    build_upload(file_name, &bytes).map(Json)
}

/// Decode an uploaded file and turn it into records.
pub fn build_upload(file_name: Option<String>, bytes: &[u8]) -> ServerResult<UploadResponse> {
    log_info(format!(
        "📄 New upload: {} ({})",
        file_name.as_deref().unwrap_or("unknown"),
        format_file_size(bytes.len() as u64)
    ));

    let decoded = decode_bytes(bytes).map_err(|e| {
        log_error(format!("Decode error: {}", e));
        ServerError::Pipeline(PipelineError::Input(e))
    })?;
    log_success(format!("Detected encoding: {}", decoded.encoding));

    let response = UploadResponse::from_decoded(file_name, bytes.len() as u64, decoded);
    log_success(format!(
        "Read {} records with {} columns",
        response.metadata.row_count,
        response.metadata.columns.len()
    ));
    Ok(response)
}

/// Apply record operations endpoint
async fn transform_records(
    Json(request): Json<TransformRequest>,
) -> ServerResult<Json<TransformResponse>> {
    log_info(format!(
        "⚙️  Applying {} operation(s) to {} records",
        request.operations.len(),
        request.records.len()
    ));
    for op in &request.operations {
        log_info_indent(op.to_string(), 1);
    }

    let records = execute_records(&request.records, &request.operations).map_err(|e| {
        log_error(e.to_string());
        e
    })?;
    log_success(format!("{} records after transformation", records.len()));

    Ok(Json(TransformResponse {
        columns: header_of(&records),
        operations_applied: request.operations.len(),
        records,
    }))
}

/// Export endpoint: CSV or HTML text with a matching content type
async fn export_records(Json(request): Json<ExportRequest>) -> ServerResult<Response> {
    let body = request.render()?;
    log_success(format!(
        "Exported {} records as {:?} ({})",
        request.records.len(),
        request.format,
        format_file_size(body.len() as u64)
    ));
    Ok(([(header::CONTENT_TYPE, request.format.content_type())], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ExportFormat;
    use crate::error::{Axis, TransformError};
    use crate::models::{Record, RecordId};
    use crate::transform::dsl::RecordOperation;
    use axum::http::StatusCode;

    fn people() -> Vec<Record> {
        vec![
            Record::with_id("a").field("name", "Ana").field("age", "30"),
            Record::with_id("b").field("name", "Bob").field("age", "25"),
            Record::with_id("c").field("name", "Cy").field("age", "41"),
        ]
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "tabulate");
    }

    #[tokio::test]
    async fn test_transform_endpoint_keeps_ids() {
        LOG_BROADCASTER.set_echo(false);
        let request = TransformRequest {
            records: people(),
            operations: vec![
                RecordOperation::DeleteRow { index: 0 },
                RecordOperation::Sort {
                    column: 1,
                    direction: Default::default(),
                },
                RecordOperation::SwapColumns { a: 0, b: 1 },
            ],
        };

        let Json(response) = transform_records(Json(request)).await.unwrap();

        assert_eq!(response.operations_applied, 3);
        assert_eq!(response.columns, vec!["age", "name"]);
        let ids: Vec<_> = response.records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![Some(RecordId::from("b")), Some(RecordId::from("c"))]);
    }

    #[tokio::test]
    async fn test_transform_endpoint_out_of_range() {
        LOG_BROADCASTER.set_echo(false);
        let request = TransformRequest {
            records: people(),
            operations: vec![RecordOperation::DeleteColumn { index: 9 }],
        };

        let err = transform_records(Json(request)).await.unwrap_err();

        assert!(matches!(
            err,
            ServerError::Transform(TransformError::OutOfRange {
                axis: Axis::Column,
                ..
            })
        ));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_export_endpoint_content_type() {
        LOG_BROADCASTER.set_echo(false);
        let request = ExportRequest {
            records: people(),
            format: ExportFormat::Html,
            title: None,
        };

        let response = export_records(Json(request)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_build_upload() {
        LOG_BROADCASTER.set_echo(false);
        let upload = build_upload(Some("p.csv".into()), b"name,age\nAna,30\n").unwrap();
        assert_eq!(upload.metadata.file_name.as_deref(), Some("p.csv"));
        assert_eq!(upload.metadata.row_count, 1);
        assert_eq!(upload.records[0].get("name"), Some("Ana"));
    }

    #[test]
    fn test_build_upload_latin1() {
        LOG_BROADCASTER.set_echo(false);
        // "café" in ISO-8859-1, repeated so detection has something to go on
        let mut bytes = b"word\n".to_vec();
        for _ in 0..20 {
            bytes.extend_from_slice(b"caf\xe9 cr\xe8me br\xfbl\xe9e\n");
        }
        let upload = build_upload(None, &bytes).unwrap();
        assert_eq!(upload.metadata.row_count, 20);
        assert!(upload.records[0].get("word").unwrap().starts_with("caf"));
    }

    #[test]
    fn test_router_builds() {
        let _ = router(&ServerConfig::default());
    }
}
