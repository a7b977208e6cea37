//! Conversion dispatch: the per-request state machine.
//!
//! Each request moves linearly through
//! `Received → Validated → Staged → Converting → Responded / ErrorResponded`
//! with no branching back. The staged files are owned by this module for the
//! duration of the `Converting` state; their removal happens unconditionally
//! on leaving it — the [`StagedFile`] drop guard fires on the success path,
//! on the failure path, and on a panic alike, so cleanup is enforced by
//! ownership rather than by a `finally`-style block.
//!
//! Collaborator failures are translated to
//! [`ConvertError::ConversionFailed`] here and never retried.

use crate::converter::{DocumentToPdfRenderer, PdfToWordConverter, PdfToWordOptions};
use crate::error::ConvertError;
use crate::options::{ConversionOptions, ImageQuality, PageLayout};
use crate::pipeline::stage::StagedFile;
use crate::pipeline::validate::UploadedFile;
use std::path::Path;
use std::time::Instant;

/// The bytes and download name of a finished conversion.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub bytes: Vec<u8>,
    pub download_name: String,
}

/// Drive the PDF→Word path: stage, convert, read back, clean up.
pub async fn pdf_to_word(
    converter: &dyn PdfToWordConverter,
    staging_root: &Path,
    upload: &UploadedFile,
    options: &ConversionOptions,
) -> Result<ConversionOutcome, ConvertError> {
    let started = Instant::now();
    let staged = StagedFile::create(staging_root, &upload.bytes, "pdf", "docx")?;

    let converter_options = PdfToWordOptions::new(
        options.pages.clone(),
        options.image_quality != ImageQuality::Low,
    );

    let result = converter
        .convert(staged.input_path(), staged.output_path(), &converter_options)
        .await;

    // translate the collaborator outcome; `staged` still owns both paths and
    // removes them when this function returns, whichever arm we take
    result.map_err(ConvertError::from)?;
    let bytes = staged.read_output()?;

    tracing::info!(
        "Converted {} to Word in {}ms ({} bytes)",
        upload.filename,
        started.elapsed().as_millis(),
        bytes.len()
    );

    Ok(ConversionOutcome {
        bytes,
        download_name: derive_download_name(&upload.filename, "docx"),
    })
}

/// Drive the Word→PDF path: stage, render, read back, clean up.
pub async fn word_to_pdf(
    renderer: &dyn DocumentToPdfRenderer,
    staging_root: &Path,
    upload: &UploadedFile,
    options: &ConversionOptions,
) -> Result<ConversionOutcome, ConvertError> {
    let started = Instant::now();
    let staged = StagedFile::create(staging_root, &upload.bytes, &upload.extension(), "pdf")?;

    let layout = PageLayout {
        size: options.page_size,
        orientation: options.orientation,
    };

    let result = renderer
        .render(staged.input_path(), staged.output_path(), layout)
        .await;

    result.map_err(ConvertError::from)?;
    let bytes = staged.read_output()?;

    tracing::info!(
        "Converted {} to PDF in {}ms ({} bytes)",
        upload.filename,
        started.elapsed().as_millis(),
        bytes.len()
    );

    Ok(ConversionOutcome {
        bytes,
        download_name: derive_download_name(&upload.filename, "pdf"),
    })
}

/// Replace the upload's extension with the target one, case-insensitively:
/// `Report.PDF` downloads as `Report.docx`.
fn derive_download_name(filename: &str, target_ext: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "converted".to_string());
    format!("{stem}.{target_ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::PdfToWordConverter;
    use crate::error::ConverterError;
    use async_trait::async_trait;
    use axum::body::Bytes;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Converter double: writes a fixed payload, or fails, and records the
    /// options it was called with.
    struct FakeConverter {
        fail: bool,
        seen_options: Mutex<Option<PdfToWordOptions>>,
    }

    impl FakeConverter {
        fn ok() -> Self {
            Self {
                fail: false,
                seen_options: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                seen_options: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl PdfToWordConverter for FakeConverter {
        async fn convert(
            &self,
            _input: &Path,
            output: &Path,
            options: &PdfToWordOptions,
        ) -> Result<(), ConverterError> {
            *self.seen_options.lock().unwrap() = Some(options.clone());
            if self.fail {
                return Err(ConverterError::Tool {
                    tool: "fake".into(),
                    detail: "synthetic failure".into(),
                });
            }
            std::fs::write(output, b"PK\x03\x04fake-docx").unwrap();
            Ok(())
        }
    }

    fn upload(name: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4 fake"),
        }
    }

    #[tokio::test]
    async fn success_returns_bytes_and_cleans_up() {
        let root = TempDir::new().unwrap();
        let converter = FakeConverter::ok();

        let outcome = pdf_to_word(
            &converter,
            root.path(),
            &upload("report.pdf"),
            &ConversionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.bytes, b"PK\x03\x04fake-docx");
        assert_eq!(outcome.download_name, "report.docx");
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn failure_maps_to_conversion_failed_and_cleans_up() {
        let root = TempDir::new().unwrap();
        let converter = FakeConverter::failing();

        let err = pdf_to_word(
            &converter,
            root.path(),
            &upload("report.pdf"),
            &ConversionOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConvertError::ConversionFailed { .. }));
        assert!(err.to_string().contains("synthetic failure"));
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn low_quality_turns_rotation_off_and_pages_pass_through() {
        let root = TempDir::new().unwrap();
        let converter = FakeConverter::ok();
        let options = ConversionOptions {
            pages: Some(vec![1, 2, 2, 5]),
            image_quality: ImageQuality::Low,
            ..Default::default()
        };

        pdf_to_word(&converter, root.path(), &upload("a.pdf"), &options)
            .await
            .unwrap();

        let seen = converter.seen_options.lock().unwrap().clone().unwrap();
        assert!(!seen.rotate_page);
        assert_eq!(seen.pages.as_deref(), Some(&[1, 2, 2, 5][..]));
    }

    #[test]
    fn download_name_replaces_extension_case_insensitively() {
        assert_eq!(derive_download_name("Report.PDF", "docx"), "Report.docx");
        assert_eq!(derive_download_name("notes.pdf", "docx"), "notes.docx");
        assert_eq!(derive_download_name("memo.DocX", "pdf"), "memo.pdf");
    }
}
