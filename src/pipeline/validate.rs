//! Upload validation: the four request-level checks that run before any
//! temporary file is created.
//!
//! The size check measures the buffered bytes themselves — by the time a
//! multipart field has been collected the length is ground truth, so a lying
//! `Content-Length` header cannot sneak an oversized document past the
//! ceiling.

use crate::error::ConvertError;
use axum::body::Bytes;

/// An upload that passed validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, used for extension checks and to derive the
    /// download name.
    pub filename: String,
    /// The raw uploaded bytes.
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Lowercased extension of the uploaded filename (without the dot).
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.filename)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default()
    }
}

/// Validate the `file` field of a conversion request.
///
/// `field` is `None` when the multipart form had no `file` part at all.
/// `accepted` is the operation's accepted extension set (lowercase, no dot),
/// and `expected_label` names it in the error message (`"PDF"`, `"Word"`).
///
/// Checks run in order; the first failure wins:
/// 1. [`ConvertError::MissingFile`]
/// 2. [`ConvertError::EmptyFilename`]
/// 3. [`ConvertError::UnsupportedExtension`]
/// 4. [`ConvertError::FileTooLarge`]
pub fn validate_upload(
    field: Option<(String, Bytes)>,
    accepted: &[&str],
    expected_label: &str,
    max_bytes: usize,
) -> Result<UploadedFile, ConvertError> {
    let (filename, bytes) = field.ok_or(ConvertError::MissingFile)?;

    if filename.is_empty() {
        return Err(ConvertError::EmptyFilename);
    }

    let upload = UploadedFile { filename, bytes };

    if !accepted.contains(&upload.extension().as_str()) {
        return Err(ConvertError::UnsupportedExtension {
            filename: upload.filename,
            expected: expected_label.to_string(),
        });
    }

    if upload.bytes.len() > max_bytes {
        return Err(ConvertError::FileTooLarge {
            size: upload.bytes.len(),
            limit_mib: max_bytes / (1024 * 1024),
        });
    }

    tracing::info!(
        "Validated upload: {} ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );
    Ok(upload)
}
