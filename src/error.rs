//! Error types for the docshift conversion pipeline.
//!
//! Two distinct error types reflect two distinct failure boundaries:
//!
//! * [`ConvertError`] — **Request-level**: everything the pipeline itself can
//!   reject or fail on. Each variant maps to exactly one HTTP status, so a
//!   handler is a plain `Result<Response, ConvertError>` and the mapping to
//!   `{"error": …}` JSON lives in one place.
//!
//! * [`ConverterError`] — **Collaborator-level**: what an external Document
//!   Converter (pdf2docx subprocess, canvas renderer, headless office tool)
//!   returns. The dispatcher translates it into
//!   [`ConvertError::ConversionFailed`] at its boundary, so cleanup always
//!   runs before the failure is surfaced.
//!
//! Validation errors are raised before any temporary file exists; conversion
//! errors are caught after staging, where the staged files' `Drop` guarantees
//! removal on the way out.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// All request-level errors returned by the conversion pipeline.
///
/// Collaborator failures use [`ConverterError`] and are translated into
/// [`ConvertError::ConversionFailed`] by the dispatcher.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Client input errors (HTTP 400) ───────────────────────────────────
    /// The multipart form had no `file` field.
    #[error("No file provided")]
    MissingFile,

    /// A `file` field was present but its filename is empty.
    #[error("No file selected")]
    EmptyFilename,

    /// The filename's extension is not in the operation's accepted set.
    #[error("File must be a {expected} document, got '{filename}'")]
    UnsupportedExtension { filename: String, expected: String },

    /// The uploaded byte length exceeds the fixed ceiling.
    #[error("File size must be less than {limit_mib} MiB (got {size} bytes)")]
    FileTooLarge { size: usize, limit_mib: usize },

    /// The `page_range` parameter does not match the range grammar.
    #[error("Invalid page range token '{token}'")]
    InvalidPageRange { token: String },

    // ── Conversion errors (HTTP 500, message surfaced) ───────────────────
    /// The external Document Converter failed. Never retried.
    #[error("Conversion failed: {detail}")]
    ConversionFailed { detail: String },

    // ── Server errors (HTTP 500, generic message) ────────────────────────
    /// Filesystem failure while staging the upload or reading the output.
    #[error("Server error: {0}")]
    Staging(#[from] std::io::Error),

    /// Anything unexpected.
    #[error("Server error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ConvertError::MissingFile
            | ConvertError::EmptyFilename
            | ConvertError::UnsupportedExtension { .. }
            | ConvertError::FileTooLarge { .. }
            | ConvertError::InvalidPageRange { .. } => StatusCode::BAD_REQUEST,
            ConvertError::ConversionFailed { .. }
            | ConvertError::Staging(_)
            | ConvertError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// A failure inside an external Document Converter collaborator.
///
/// Returned by [`crate::converter::PdfToWordConverter`] and
/// [`crate::converter::DocumentToPdfRenderer`] implementations; never mapped
/// to HTTP directly.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The converter tool could not be spawned or exited non-zero.
    #[error("{tool}: {detail}")]
    Tool { tool: String, detail: String },

    /// The input document could not be read or parsed.
    #[error("Failed to read input document: {0}")]
    Read(String),

    /// The output document could not be produced or written.
    #[error("Failed to write output document: {0}")]
    Write(String),
}

impl From<ConverterError> for ConvertError {
    fn from(err: ConverterError) -> Self {
        ConvertError::ConversionFailed {
            detail: err.to_string(),
        }
    }
}
