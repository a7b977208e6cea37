//! Temporary resource management: staged input/output files scoped to one
//! request.
//!
//! ## Why a TempDir per request?
//!
//! The external converters require file-system paths — they cannot stream
//! from a byte buffer. Giving each request its own `TempDir` yields paths the
//! collaborators can open while making cleanup a drop-time guarantee: the
//! directory and everything in it is removed when [`StagedFile`] goes out of
//! scope, whether the conversion succeeded, returned an error, or panicked
//! partway through.
//!
//! Removal is error-tolerant. A file that was never created is not an error;
//! an unexpected removal failure is logged at WARN and swallowed — it must
//! never mask or replace the primary response.

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A request-scoped pair of staged paths: the uploaded input and the sibling
/// output produced by suffix substitution.
///
/// Exclusively owned by one request handler. Both paths live inside a
/// [`TempDir`] that is deleted on drop.
#[derive(Debug)]
pub struct StagedFile {
    dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

impl StagedFile {
    /// Write `bytes` to a staged input file with `input_suffix` (e.g. `pdf`)
    /// and derive the sibling output path with `output_suffix` (e.g. `docx`).
    pub fn create(
        staging_root: &Path,
        bytes: &[u8],
        input_suffix: &str,
        output_suffix: &str,
    ) -> Result<Self, ConvertError> {
        let dir = TempDir::with_prefix_in("docshift-", staging_root)?;
        let input = dir.path().join(format!("input.{input_suffix}"));
        let output = input.with_extension(output_suffix);
        std::fs::write(&input, bytes)?;
        tracing::debug!("Staged {} bytes at {}", bytes.len(), input.display());
        Ok(Self { dir, input, output })
    }

    /// Path of the staged input file.
    pub fn input_path(&self) -> &Path {
        &self.input
    }

    /// Path the converter must write its output to. Not created yet.
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Read back the converted output.
    ///
    /// A missing output file means the collaborator reported success without
    /// producing anything, which is surfaced as a conversion failure rather
    /// than a generic I/O error.
    pub fn read_output(&self) -> Result<Vec<u8>, ConvertError> {
        match std::fs::read(&self.output) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConvertError::ConversionFailed {
                    detail: "converter produced no output file".to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        for path in [&self.input, &self.output] {
            match std::fs::remove_file(path) {
                Ok(()) => tracing::debug!("Cleaned up: {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!("Could not remove {}: {}", path.display(), e),
            }
        }
        // the TempDir's own Drop removes the (now empty) directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_is_a_sibling_with_substituted_suffix() {
        let root = TempDir::new().unwrap();
        let staged = StagedFile::create(root.path(), b"%PDF-1.4", "pdf", "docx").unwrap();
        assert_eq!(staged.input_path().extension().unwrap(), "pdf");
        assert_eq!(staged.output_path().extension().unwrap(), "docx");
        assert_eq!(
            staged.input_path().parent(),
            staged.output_path().parent()
        );
        assert_eq!(std::fs::read(staged.input_path()).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn drop_removes_input_output_and_directory() {
        let root = TempDir::new().unwrap();
        let (input, output, dir);
        {
            let staged = StagedFile::create(root.path(), b"data", "docx", "pdf").unwrap();
            std::fs::write(staged.output_path(), b"converted").unwrap();
            input = staged.input_path().to_path_buf();
            output = staged.output_path().to_path_buf();
            dir = input.parent().unwrap().to_path_buf();
        }
        assert!(!input.exists());
        assert!(!output.exists());
        assert!(!dir.exists());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn drop_tolerates_missing_output() {
        let root = TempDir::new().unwrap();
        {
            let _staged = StagedFile::create(root.path(), b"data", "pdf", "docx").unwrap();
            // conversion never ran; only the input exists
        }
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_output_reads_as_conversion_failure() {
        let root = TempDir::new().unwrap();
        let staged = StagedFile::create(root.path(), b"data", "pdf", "docx").unwrap();
        let err = staged.read_output().unwrap_err();
        assert!(matches!(err, ConvertError::ConversionFailed { .. }));
    }
}
