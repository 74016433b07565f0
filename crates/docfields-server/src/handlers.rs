//! HTTP request handlers for the extraction service.
//!
//! Implements text parsing (rule-based and AI-backed), PDF preview and PDF
//! chunking endpoints, plus health and echo, using axum.

use crate::config::{ConfigError, ServerConfig};
use crate::pdf::{PdfError, PdfText};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use docfields_domain::{CompletionService, ExtractionResult};
use docfields_extractor::{ChunkAssembler, ChunkPreview, ExtractionOrchestrator};
use docfields_llm::LlmError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Completion service shared by every request
pub type SharedCompletion = Arc<dyn CompletionService<Error = LlmError>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// AI extraction with rule-based fallback
    pub orchestrator: Arc<ExtractionOrchestrator<dyn CompletionService<Error = LlmError>>>,
    /// Chunker for uploaded documents
    pub assembler: ChunkAssembler,
    /// Pages read for previews
    pub preview_pages: usize,
    /// Lines kept in previews
    pub preview_lines: usize,
    /// Request body limit in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build state from configuration and an already-constructed completion service
    pub fn new(completion: SharedCompletion, config: &ServerConfig) -> Result<Self, ConfigError> {
        let assembler = ChunkAssembler::new(config.extractor.chunker()?);
        let orchestrator = ExtractionOrchestrator::new(completion, config.extractor.clone());

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            assembler,
            preview_pages: config.preview_pages,
            preview_lines: config.preview_lines,
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}

/// Text parsing request
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseTextRequest {
    /// Free-form text to parse
    pub text: String,
}

/// Rule-based parsing response
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseTextResponse {
    /// The text as received
    pub raw_text: String,
    /// Extraction result
    pub parsed: ExtractionResult,
}

/// PDF preview response
#[derive(Debug, Serialize, Deserialize)]
pub struct PdfPreviewResponse {
    /// Total page count
    pub pages: usize,
    /// Leading lines of the first pages
    pub preview_text: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: String,
}

/// Echo response
#[derive(Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    /// The JSON object that was posted
    pub you_sent: Map<String, Value>,
    /// Number of top-level keys
    pub length: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed request (multipart problems, missing file field)
    BadRequest(String),
    /// Upload was not a readable PDF
    Pdf(PdfError),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Pdf(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<PdfError> for AppError {
    fn from(e: PdfError) -> Self {
        AppError::Pdf(e)
    }
}

/// An uploaded file
struct Upload {
    filename: String,
    bytes: axum::body::Bytes,
}

/// Pull the `file` field out of a multipart body
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("unnamed").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        return Ok(Upload { filename, bytes });
    }

    Err(AppError::BadRequest("Missing 'file' field".to_string()))
}

/// Parse PDF bytes off the async executor
async fn load_pdf(upload: &Upload) -> Result<PdfText, AppError> {
    let bytes = upload.bytes.clone();
    let parsed = tokio::task::spawn_blocking(move || PdfText::from_bytes(&bytes))
        .await
        .map_err(|e| AppError::InternalError(format!("Task join error: {}", e)))?;

    parsed.map_err(|e| {
        warn!("Rejected upload '{}': {}", upload.filename, e);
        AppError::from(e)
    })
}

/// GET /health - Liveness check
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST /echo - Return the posted object and its key count
async fn echo(Json(data): Json<Map<String, Value>>) -> Json<EchoResponse> {
    let length = data.len();
    Json(EchoResponse {
        you_sent: data,
        length,
    })
}

/// POST /parse-text - Rule-based extraction
async fn parse_text(
    State(state): State<AppState>,
    Json(payload): Json<ParseTextRequest>,
) -> Json<ParseTextResponse> {
    let parsed = state.orchestrator.extract_with_rules(&payload.text);

    Json(ParseTextResponse {
        raw_text: payload.text,
        parsed,
    })
}

/// POST /ai/parse-text - AI extraction with rule-based fallback
async fn ai_parse_text(
    State(state): State<AppState>,
    Json(payload): Json<ParseTextRequest>,
) -> Json<ExtractionResult> {
    let result = state.orchestrator.extract_with_ai(&payload.text).await;
    info!("ai/parse-text answered from {}", result.source);
    Json(result)
}

/// POST /parse-pdf-preview - Page count and leading lines
async fn parse_pdf_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PdfPreviewResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let pdf = load_pdf(&upload).await?;

    info!("parse-pdf-preview '{}': {} pages", upload.filename, pdf.page_count());

    Ok(Json(PdfPreviewResponse {
        pages: pdf.page_count(),
        preview_text: pdf.preview(state.preview_pages, state.preview_lines),
    }))
}

/// POST /parse-pdf - Chunk the whole document and return a preview
async fn parse_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ChunkPreview>, AppError> {
    let upload = read_upload(multipart).await?;
    let pdf = load_pdf(&upload).await?;

    let chunks = state.assembler.assemble(&pdf.full_text(), &upload.filename);
    info!(
        "parse-pdf '{}': {} pages, {} chunks",
        upload.filename,
        pdf.page_count(),
        chunks.len()
    );

    Ok(Json(ChunkPreview::from_chunks(&chunks)))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    let body_limit = state.max_upload_bytes;

    AxumRouter::new()
        .route("/health", get(health))
        .route("/echo", post(echo))
        .route("/parse-text", post(parse_text))
        .route("/ai/parse-text", post(ai_parse_text))
        .route("/parse-pdf-preview", post(parse_pdf_preview))
        .route("/parse-pdf", post(parse_pdf))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
