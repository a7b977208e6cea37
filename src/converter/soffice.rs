//! External-tool Word→PDF renderer: headless office-suite subprocess.
//!
//! This strategy delegates the whole rendition to an installed office suite
//! (`soffice --headless --convert-to pdf`). It reproduces styling the canvas
//! renderer drops, but the tool is a hard platform dependency — deployments
//! without it must select the canvas strategy instead. Availability is probed
//! once at startup; a missing tool still surfaces per-request as a
//! conversion failure.
//!
//! The tool names its output after the input stem inside `--outdir`, so the
//! result is renamed onto the staged output path afterwards.
//!
//! Page size and orientation are ignored on this path: the document's own
//! page setup wins, exactly as the office suite would print it.

use crate::converter::DocumentToPdfRenderer;
use crate::error::ConverterError;
use crate::options::PageLayout;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Subprocess wrapper around a headless office suite.
#[derive(Debug, Clone)]
pub struct SofficeRenderer {
    command: String,
}

impl SofficeRenderer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Probe whether the tool is on PATH.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl DocumentToPdfRenderer for SofficeRenderer {
    async fn render(
        &self,
        input: &Path,
        output: &Path,
        _layout: PageLayout,
    ) -> Result<(), ConverterError> {
        let outdir = output.parent().ok_or_else(|| ConverterError::Write(
            "output path has no parent directory".to_string(),
        ))?;

        tracing::info!(
            "Running {} --headless --convert-to pdf {}",
            self.command,
            input.display()
        );

        let result = Command::new(&self.command)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(outdir)
            .arg(input)
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

        // soffice writes <outdir>/<input stem>.pdf
        let produced = outdir.join(
            input
                .file_stem()
                .map(|s| s.to_os_string())
                .unwrap_or_default(),
        );
        let produced = produced.with_extension("pdf");
        if produced != output {
            std::fs::rename(&produced, output)
                .map_err(|e| ConverterError::Write(format!(
                    "could not move converted file into place: {e}"
                )))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Orientation, PageSize};
    use std::path::PathBuf;

    #[tokio::test]
    async fn missing_tool_reports_spawn_failure() {
        let renderer = SofficeRenderer::new("definitely-not-a-real-binary-41aa");
        let layout = PageLayout {
            size: PageSize::A4,
            orientation: Orientation::Portrait,
        };
        let err = renderer
            .render(
                &PathBuf::from("/tmp/in.docx"),
                &PathBuf::from("/tmp/out.pdf"),
                layout,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to spawn"), "got: {err}");
    }

    #[tokio::test]
    async fn missing_tool_is_not_available() {
        let renderer = SofficeRenderer::new("definitely-not-a-real-binary-41aa");
        assert!(!renderer.is_available().await);
    }
}
