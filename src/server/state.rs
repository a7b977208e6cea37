//! Shared application state.
//!
//! One immutable bundle of configuration plus the two injected collaborator
//! seams. Cloning is cheap (all `Arc`s); there is no mutable cross-request
//! state anywhere in the service.

use crate::config::{RendererKind, ServiceConfig};
use crate::converter::canvas::CanvasRenderer;
use crate::converter::pdf2docx::Pdf2DocxCli;
use crate::converter::soffice::SofficeRenderer;
use crate::converter::{DocumentToPdfRenderer, PdfToWordConverter};
use std::sync::Arc;

/// Immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub pdf_to_word: Arc<dyn PdfToWordConverter>,
    pub word_to_pdf: Arc<dyn DocumentToPdfRenderer>,
}

impl AppState {
    /// Wire up the collaborators the configuration selects.
    pub fn from_config(config: ServiceConfig) -> Self {
        let pdf_to_word: Arc<dyn PdfToWordConverter> =
            Arc::new(Pdf2DocxCli::new(config.pdf2docx_command.clone()));

        let word_to_pdf: Arc<dyn DocumentToPdfRenderer> = match config.renderer {
            RendererKind::Canvas => Arc::new(CanvasRenderer),
            RendererKind::Soffice => Arc::new(SofficeRenderer::new(config.soffice_command.clone())),
        };

        Self {
            config: Arc::new(config),
            pdf_to_word,
            word_to_pdf,
        }
    }

    /// Replace the PDF→Word collaborator (tests inject doubles here).
    pub fn with_pdf_to_word(mut self, converter: Arc<dyn PdfToWordConverter>) -> Self {
        self.pdf_to_word = converter;
        self
    }

    /// Replace the Word→PDF collaborator.
    pub fn with_word_to_pdf(mut self, renderer: Arc<dyn DocumentToPdfRenderer>) -> Self {
        self.word_to_pdf = renderer;
        self
    }
}
