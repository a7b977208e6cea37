//! Word document reader: paragraph plain text from a `.docx` file.
//!
//! Only the visible run text is extracted — styling, tables, and images are
//! deliberately dropped, since the canvas renderer produces a bare-text
//! rendition. Legacy binary `.doc` files are not readable here; they surface
//! as a read error and are only convertible via the office-automation
//! renderer.

use crate::error::ConverterError;
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::path::Path;

/// Read every paragraph's plain text from the document at `path`.
///
/// Returns one string per paragraph, in document order, empty paragraphs
/// included (the renderer skips them but uses them for spacing decisions).
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>, ConverterError> {
    let bytes = std::fs::read(path).map_err(|e| ConverterError::Read(e.to_string()))?;
    read_paragraphs_from_bytes(&bytes)
}

/// Same as [`read_paragraphs`], from an in-memory buffer.
pub fn read_paragraphs_from_bytes(bytes: &[u8]) -> Result<Vec<String>, ConverterError> {
    let docx = read_docx(bytes).map_err(|e| ConverterError::Read(e.to_string()))?;

    let paragraphs = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();

    Ok(paragraphs)
}

/// Concatenate the text of every run in a paragraph.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push(' '),
                    _ => {}
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};
    use std::io::Cursor;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for p in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn paragraphs_come_back_in_document_order() {
        let bytes = build_docx(&["first", "second", "third"]);
        let paragraphs = read_paragraphs_from_bytes(&bytes).unwrap();
        assert_eq!(paragraphs, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_paragraphs_are_preserved() {
        let bytes = build_docx(&["above", "", "below"]);
        let paragraphs = read_paragraphs_from_bytes(&bytes).unwrap();
        assert_eq!(paragraphs, vec!["above", "", "below"]);
    }

    #[test]
    fn garbage_bytes_fail_with_a_read_error() {
        let err = read_paragraphs_from_bytes(b"this is not a zip archive").unwrap_err();
        assert!(matches!(err, ConverterError::Read(_)));
    }
}
