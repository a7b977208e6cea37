//! Manual Word→PDF renderer: paragraph text drawn onto a bare PDF canvas.
//!
//! This is the platform-independent strategy. It makes no attempt to
//! reproduce styling — bold, tables, and images from the source document are
//! all dropped; the output is a plain-text rendition in 12-pt Helvetica with
//! a title line, a metadata block, and an attribution footer on every page.
//!
//! [`PdfCanvas`] wraps the primitive operations the layout loop needs
//! (set_font / draw_text / text_width / new_page / finish) over lopdf's
//! object model, keeping the layout code free of PDF plumbing. Content
//! streams are written uncompressed; these documents are small.

use crate::converter::{docx, DocumentToPdfRenderer};
use crate::error::ConverterError;
use crate::options::PageLayout;
use async_trait::async_trait;
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

/// Fixed body font size in points.
const BODY_PT: f64 = 12.0;
/// Title font size in points.
const TITLE_PT: f64 = 16.0;
/// Page margin on all four sides, in points.
const MARGIN: f64 = 54.0;
/// Vertical advance per body line.
const LEADING: f64 = BODY_PT * 1.4;
/// Attribution drawn at the bottom margin of every page.
const FOOTER: &str = "Generated by docshift (bare-text rendition)";

// ── Helvetica metrics ────────────────────────────────────────────────────

/// AFM advance widths for Helvetica, ASCII 0x20..=0x7E, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance width of `text` at `size` points in Helvetica.
///
/// Characters outside the ASCII table fall back to the average lowercase
/// advance; good enough for wrapping a bare-text rendition.
pub fn text_width(text: &str, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| match (c as u32).checked_sub(0x20) {
            Some(i) if (i as usize) < HELVETICA_WIDTHS.len() => {
                HELVETICA_WIDTHS[i as usize] as u32
            }
            _ => 556,
        })
        .sum();
    units as f64 * size / 1000.0
}

// ── Canvas ───────────────────────────────────────────────────────────────

/// A minimal multi-page PDF canvas: one Helvetica font, text drawing only.
///
/// Coordinates follow PDF conventions — origin at the bottom-left corner,
/// y increasing upwards.
pub struct PdfCanvas {
    doc: Document,
    page_width: f64,
    page_height: f64,
    page_contents: Vec<Vec<Operation>>,
    current: Vec<Operation>,
}

impl PdfCanvas {
    /// Start a canvas with one open page of the given dimensions (points).
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            doc: Document::with_version("1.5"),
            page_width,
            page_height,
            page_contents: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_contents.len() + 1
    }

    /// Draw `text` at `(x, y)` with the built-in Helvetica font at `size` pt.
    /// Coordinates are rounded to whole points.
    pub fn draw_text(&mut self, x: f64, y: f64, size: f64, text: &str) {
        self.current.push(Operation::new("BT", vec![]));
        self.current.push(Operation::new(
            "Tf",
            vec!["F1".into(), (size.round() as i64).into()],
        ));
        self.current.push(Operation::new(
            "Td",
            vec![(x.round() as i64).into(), (y.round() as i64).into()],
        ));
        self.current.push(Operation::new(
            "Tj",
            vec![Object::string_literal(text)],
        ));
        self.current.push(Operation::new("ET", vec![]));
    }

    /// Close the current page and start an empty one.
    pub fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.page_contents.push(finished);
    }

    /// Finish the document and return its bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, ConverterError> {
        self.page_contents.push(self.current);

        let pages_id = self.doc.new_object_id();
        let font_id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = self.doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.page_contents.len());
        for ops in self.page_contents {
            let content = Content { operations: ops };
            let encoded = content
                .encode()
                .map_err(|e| ConverterError::Write(e.to_string()))?;
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    (self.page_width.round() as i64).into(),
                    (self.page_height.round() as i64).into(),
                ],
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| ConverterError::Write(e.to_string()))?;
        Ok(bytes)
    }
}

// ── Layout ───────────────────────────────────────────────────────────────

/// Greedy word-wrap: split `text` into lines no wider than `max_width` at
/// `size` pt. A single word wider than the line gets a line of its own.
fn wrap_text(text: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if text_width(&candidate, size) <= max_width || line.is_empty() {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render paragraphs into a finished PDF.
///
/// `title` is drawn once on the first page; the metadata block follows it;
/// body lines flow from there, breaking to a new page whenever the cursor
/// would cross the bottom margin. The attribution footer lands on every page.
fn render_document(
    title: &str,
    paragraphs: &[String],
    layout: PageLayout,
) -> Result<Vec<u8>, ConverterError> {
    let (width, height) = layout.dimensions();
    let max_line_width = width - 2.0 * MARGIN;
    let bottom = MARGIN + LEADING; // last usable baseline above the footer

    let mut canvas = PdfCanvas::new(width, height);
    let mut cursor = height - MARGIN;

    let footer = |canvas: &mut PdfCanvas| {
        canvas.draw_text(MARGIN, MARGIN - BODY_PT, 8.0, FOOTER);
    };

    // Title
    canvas.draw_text(MARGIN, cursor, TITLE_PT, title);
    cursor -= TITLE_PT * 1.6;

    // Metadata block
    let metadata = [
        format!("Converted: {}", Utc::now().to_rfc3339()),
        "Source format: Word (DOCX)".to_string(),
        format!(
            "Page setup: {} {}",
            layout.size.as_str(),
            layout.orientation.as_str()
        ),
    ];
    for line in &metadata {
        canvas.draw_text(MARGIN, cursor, 9.0, line);
        cursor -= 9.0 * 1.4;
    }
    cursor -= LEADING;

    // Body
    for paragraph in paragraphs {
        if paragraph.trim().is_empty() {
            continue;
        }
        for line in wrap_text(paragraph, BODY_PT, max_line_width) {
            if cursor < bottom {
                footer(&mut canvas);
                canvas.new_page();
                cursor = height - MARGIN;
            }
            canvas.draw_text(MARGIN, cursor, BODY_PT, &line);
            cursor -= LEADING;
        }
        cursor -= LEADING * 0.5;
    }

    footer(&mut canvas);
    canvas.finish()
}

// ── Renderer strategy ────────────────────────────────────────────────────

/// The manual-render Word→PDF strategy.
#[derive(Debug, Clone, Default)]
pub struct CanvasRenderer;

#[async_trait]
impl DocumentToPdfRenderer for CanvasRenderer {
    async fn render(
        &self,
        input: &Path,
        output: &Path,
        layout: PageLayout,
    ) -> Result<(), ConverterError> {
        let title = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Document".to_string());
        let input = input.to_path_buf();
        let output = output.to_path_buf();

        // PDF assembly is CPU-bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            let paragraphs = docx::read_paragraphs(&input)?;
            let bytes = render_document(&title, &paragraphs, layout)?;
            std::fs::write(&output, &bytes).map_err(|e| ConverterError::Write(e.to_string()))?;
            tracing::info!(
                "Rendered {} paragraphs to {} ({} bytes)",
                paragraphs.len(),
                output.display(),
                bytes.len()
            );
            Ok(())
        })
        .await
        .map_err(|e| ConverterError::Write(format!("render task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Orientation, PageSize};

    fn letter_landscape() -> PageLayout {
        PageLayout {
            size: PageSize::Letter,
            orientation: Orientation::Landscape,
        }
    }

    #[test]
    fn width_grows_with_text_and_size() {
        assert!(text_width("hello world", 12.0) > text_width("hello", 12.0));
        assert!(text_width("hello", 24.0) > text_width("hello", 12.0));
        assert_eq!(text_width("", 12.0), 0.0);
    }

    #[test]
    fn space_uses_the_afm_advance() {
        // 278/1000 em at 12 pt
        assert!((text_width(" ", 12.0) - 3.336).abs() < 1e-9);
    }

    #[test]
    fn wrap_respects_the_width_limit() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(10);
        let lines = wrap_text(&text, BODY_PT, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                text_width(line, BODY_PT) <= 200.0,
                "line too wide: {line:?}"
            );
        }
    }

    #[test]
    fn overlong_single_word_gets_its_own_line() {
        let lines = wrap_text("supercalifragilisticexpialidocious", BODY_PT, 10.0);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn letter_landscape_mediabox_is_swapped() {
        let bytes = render_document("t", &["hello".to_string()], letter_landscape()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("792"), "missing landscape width");
        assert!(text.contains("612"), "missing landscape height");
    }

    #[test]
    fn footer_appears_in_the_content_stream() {
        let bytes = render_document("t", &["hello".to_string()], letter_landscape()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Generated by docshift"));
    }

    #[test]
    fn long_documents_break_onto_multiple_pages() {
        let paragraphs: Vec<String> = (0..200)
            .map(|i| format!("Paragraph number {i} with a reasonable amount of text in it."))
            .collect();
        let (w, h) = letter_landscape().dimensions();
        let mut canvas = PdfCanvas::new(w, h);
        assert_eq!(canvas.page_count(), 1);
        canvas.new_page();
        assert_eq!(canvas.page_count(), 2);

        let bytes = render_document("t", &paragraphs, letter_landscape()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(
            doc.get_pages().len() > 1,
            "expected multiple pages, got {}",
            doc.get_pages().len()
        );
    }

    #[test]
    fn empty_document_still_produces_a_valid_single_page() {
        let bytes = render_document("empty", &[], letter_landscape()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
