//! PDF→Word collaborator backed by the external `pdf2docx` tool.
//!
//! The tool is invoked once per request as a subprocess:
//!
//! ```text
//! pdf2docx convert <input.pdf> <output.docx> [--pages=1,2,3] [--rotate-page=false]
//! ```
//!
//! Anything the tool writes to stderr on a non-zero exit becomes the failure
//! detail surfaced to the caller.

use crate::converter::{PdfToWordConverter, PdfToWordOptions};
use crate::error::ConverterError;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Subprocess wrapper around the `pdf2docx` CLI.
#[derive(Debug, Clone)]
pub struct Pdf2DocxCli {
    command: String,
}

impl Pdf2DocxCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Probe whether the tool is on PATH. Used for a startup log line only —
    /// a missing tool still surfaces per-request as a conversion failure.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn build_args(input: &Path, output: &Path, options: &PdfToWordOptions) -> Vec<String> {
        let mut args = vec![
            "convert".to_string(),
            input.to_string_lossy().into_owned(),
            output.to_string_lossy().into_owned(),
        ];
        if let Some(pages) = &options.pages {
            let list = pages
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",");
            args.push(format!("--pages={list}"));
        }
        if !options.rotate_page {
            args.push("--rotate-page=false".to_string());
        }
        args
    }
}

#[async_trait]
impl PdfToWordConverter for Pdf2DocxCli {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        options: &PdfToWordOptions,
    ) -> Result<(), ConverterError> {
        let args = Self::build_args(input, output, options);
        tracing::info!("Running {} {}", self.command, args.join(" "));

        let result = Command::new(&self.command)
            .args(&args)
            .output()
            .await
            .map_err(|e| ConverterError::Tool {
                tool: self.command.clone(),
                detail: format!("failed to spawn: {e}"),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ConverterError::Tool {
                tool: self.command.clone(),
                detail: format!(
                    "exit {}: {}",
                    result.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn args_for_a_full_document_are_just_the_paths() {
        let args = Pdf2DocxCli::build_args(
            &PathBuf::from("/tmp/in.pdf"),
            &PathBuf::from("/tmp/in.docx"),
            &PdfToWordOptions::new(None, true),
        );
        assert_eq!(args, vec!["convert", "/tmp/in.pdf", "/tmp/in.docx"]);
    }

    #[test]
    fn page_list_is_forwarded_comma_joined_in_order() {
        let args = Pdf2DocxCli::build_args(
            &PathBuf::from("in.pdf"),
            &PathBuf::from("in.docx"),
            &PdfToWordOptions::new(Some(vec![9, 10, 1, 1]), true),
        );
        assert!(args.contains(&"--pages=9,10,1,1".to_string()));
    }

    #[test]
    fn low_quality_disables_rotation_analysis() {
        let args = Pdf2DocxCli::build_args(
            &PathBuf::from("in.pdf"),
            &PathBuf::from("in.docx"),
            &PdfToWordOptions::new(None, false),
        );
        assert!(args.contains(&"--rotate-page=false".to_string()));
    }

    #[tokio::test]
    async fn missing_tool_reports_spawn_failure() {
        let cli = Pdf2DocxCli::new("definitely-not-a-real-binary-9c1f");
        let err = cli
            .convert(
                &PathBuf::from("in.pdf"),
                &PathBuf::from("out.docx"),
                &PdfToWordOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to spawn"), "got: {err}");
    }
}
