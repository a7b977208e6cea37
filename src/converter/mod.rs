//! External Document Converter collaborators.
//!
//! The pipeline never transforms document content itself — it drives one of
//! these seams and ships the bytes back. Each seam is a trait object injected
//! into the server state, so tests substitute mocks and deployments pick a
//! strategy without touching the pipeline:
//!
//! * [`PdfToWordConverter`] — the PDF→Word capability. The shipped
//!   implementation ([`pdf2docx::Pdf2DocxCli`]) shells out to the external
//!   `pdf2docx` tool.
//! * [`DocumentToPdfRenderer`] — the Word→PDF capability, with two mutually
//!   exclusive strategy implementations selected at configuration time:
//!   [`canvas::CanvasRenderer`] (bare-text rendition, no platform
//!   dependency) and [`soffice::SofficeRenderer`] (headless office-suite
//!   subprocess, full-fidelity but a hard platform dependency).

pub mod canvas;
pub mod docx;
pub mod pdf2docx;
pub mod soffice;

use crate::error::ConverterError;
use crate::options::PageLayout;
use async_trait::async_trait;
use std::path::Path;

/// Options forwarded to the PDF→Word collaborator.
#[derive(Debug, Clone, Default)]
pub struct PdfToWordOptions {
    /// Pages to convert (1-based, encounter order). `None` = full document.
    pub pages: Option<Vec<u32>>,
    /// Whether the converter may run its page-rotation analysis.
    /// Disabled when the client asked for `image_quality=low`.
    pub rotate_page: bool,
}

impl PdfToWordOptions {
    pub fn new(pages: Option<Vec<u32>>, rotate_page: bool) -> Self {
        Self { pages, rotate_page }
    }
}

/// The PDF→Word Document Converter capability.
///
/// One synchronous-in-spirit call per request: it blocks the handling task
/// until the converter returns or fails. Never retried.
#[async_trait]
pub trait PdfToWordConverter: Send + Sync {
    /// Convert the PDF at `input` into a Word document at `output`.
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        options: &PdfToWordOptions,
    ) -> Result<(), ConverterError>;
}

/// The Word→PDF Document Converter capability.
///
/// `layout` carries the requested page size and orientation; the
/// external-tool variant ignores it (the tool owns its own layout).
#[async_trait]
pub trait DocumentToPdfRenderer: Send + Sync {
    /// Render the Word document at `input` into a PDF at `output`.
    async fn render(
        &self,
        input: &Path,
        output: &Path,
        layout: PageLayout,
    ) -> Result<(), ConverterError>;
}
