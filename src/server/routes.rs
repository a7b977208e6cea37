//! HTTP handlers.
//!
//! Handlers collect the multipart form into plain values, run the pipeline,
//! and wrap the outcome as an attachment response. All failure paths go
//! through [`ConvertError`]'s `IntoResponse`, which renders `{"error": …}`
//! with the mapped status.

use crate::error::ConvertError;
use crate::options::{parse_page_range, ConversionOptions, ImageQuality, Orientation, PageSize};
use crate::pipeline::{dispatch, validate};
use crate::server::state::AppState;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const PDF_MIME: &str = "application/pdf";

/// `GET /` — service banner.
///
/// The default PDF→Word collaborator is AGPL-licensed; the banner keeps the
/// notice visible to callers.
pub async fn banner() -> impl IntoResponse {
    Json(json!({
        "service": "docshift document conversion",
        "version": env!("CARGO_PKG_VERSION"),
        "license": "MIT OR Apache-2.0",
        "legal_notice": "PDF to Word conversion is delegated to the pdf2docx tool, licensed under GNU AGPL v3.0",
    }))
}

/// `GET /health` — liveness probe with an RFC 3339 timestamp.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Raw form values collected from a multipart body in one pass.
#[derive(Debug, Default)]
struct FormFields {
    file: Option<(String, Bytes)>,
    values: Vec<(String, String)>,
}

impl FormFields {
    fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Drain the multipart stream. The file field is buffered whole — the size
/// ceiling is checked against these bytes, never against a client header.
async fn collect_form(mut multipart: Multipart) -> Result<FormFields, ConvertError> {
    let mut form = FormFields::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ConvertError::Internal(format!("failed to read multipart field: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ConvertError::Internal(format!("failed to read upload: {e}")))?;
            form.file = Some((filename, bytes));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ConvertError::Internal(format!("failed to read field '{name}': {e}")))?;
            form.values.push((name, value));
        }
    }
    Ok(form)
}

/// Wrap conversion output as a download attachment.
fn attachment(outcome: dispatch::ConversionOutcome, mime: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", outcome.download_name),
            ),
        ],
        outcome.bytes,
    )
        .into_response()
}

/// `POST /convert` — PDF upload in, Word document out.
pub async fn convert_pdf_to_word(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ConvertError> {
    let form = collect_form(multipart).await?;

    // validation short-circuits before any temporary file exists
    let upload = validate::validate_upload(
        form.file.clone(),
        &["pdf"],
        "PDF",
        state.config.max_upload_bytes,
    )?;

    let options = ConversionOptions {
        pages: parse_page_range(form.value("page_range").unwrap_or_default())?,
        image_quality: ImageQuality::parse_or_default(
            form.value("image_quality").unwrap_or_default(),
        ),
        ..Default::default()
    };

    let outcome = dispatch::pdf_to_word(
        state.pdf_to_word.as_ref(),
        &state.config.staging_dir,
        &upload,
        &options,
    )
    .await?;

    Ok(attachment(outcome, DOCX_MIME))
}

/// `POST /word-to-pdf` — Word upload in, PDF out.
pub async fn convert_word_to_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ConvertError> {
    let form = collect_form(multipart).await?;

    let upload = validate::validate_upload(
        form.file.clone(),
        &["docx", "doc"],
        "Word",
        state.config.max_upload_bytes,
    )?;

    let options = ConversionOptions {
        page_size: PageSize::parse_or_default(form.value("page_size").unwrap_or_default()),
        orientation: Orientation::parse_or_default(form.value("orientation").unwrap_or_default()),
        ..Default::default()
    };

    let outcome = dispatch::word_to_pdf(
        state.word_to_pdf.as_ref(),
        &state.config.staging_dir,
        &upload,
        &options,
    )
    .await?;

    Ok(attachment(outcome, PDF_MIME))
}
