//! Service configuration.
//!
//! Every deployment knob lives in [`ServiceConfig`], built via its
//! [`ServiceConfigBuilder`]. Keeping the knobs in one struct makes it trivial
//! to share across handlers, print at startup, and override from the CLI
//! without threading loose parameters through the pipeline.
//!
//! The Word→PDF strategy is chosen here, once, at deployment time
//! ([`RendererKind`]) — never per-request.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed upload ceiling: 15 MiB.
pub const MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;

/// Which Word→PDF renderer implementation to use.
///
/// The two variants are mutually exclusive strategy implementations of
/// [`crate::converter::DocumentToPdfRenderer`]:
///
/// | Kind | Mechanism | Platform dependency |
/// |------|-----------|---------------------|
/// | `Canvas` | reads paragraph text, draws it onto a bare PDF canvas | none (default) |
/// | `Soffice` | delegates to a headless office suite subprocess | the office tool must be installed |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Canvas,
    Soffice,
}

/// Configuration for the docshift service.
///
/// Built via [`ServiceConfig::builder()`] or [`ServiceConfig::default()`].
///
/// # Example
/// ```rust
/// use docshift::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .port(8080)
///     .pdf2docx_command("pdf2docx")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind host. Default: `0.0.0.0`.
    pub host: String,

    /// Bind port. Default: 5000.
    pub port: u16,

    /// Upload size ceiling in bytes. Default: [`MAX_UPLOAD_BYTES`] (15 MiB).
    ///
    /// Measured from the buffered upload itself, never from a client-supplied
    /// header. The HTTP body limit is set slightly above this so the
    /// validator — not the transport — produces the 400 response.
    pub max_upload_bytes: usize,

    /// Directory under which per-request staging directories are created.
    /// Default: the OS temp directory.
    pub staging_dir: PathBuf,

    /// Command used for the PDF→Word collaborator. Default: `pdf2docx`.
    pub pdf2docx_command: String,

    /// Word→PDF renderer strategy. Default: [`RendererKind::Canvas`].
    pub renderer: RendererKind,

    /// Command used by the `Soffice` renderer. Default: `soffice`.
    pub soffice_command: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            staging_dir: std::env::temp_dir(),
            pdf2docx_command: "pdf2docx".to_string(),
            renderer: RendererKind::default(),
            soffice_command: "soffice".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Create a new builder for `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            config: Self::default(),
        }
    }

    /// The ceiling expressed in whole MiB, for error messages.
    pub fn max_upload_mib(&self) -> usize {
        self.max_upload_bytes / (1024 * 1024)
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.staging_dir = dir.into();
        self
    }

    pub fn pdf2docx_command(mut self, cmd: impl Into<String>) -> Self {
        self.config.pdf2docx_command = cmd.into();
        self
    }

    pub fn renderer(mut self, kind: RendererKind) -> Self {
        self.config.renderer = kind;
        self
    }

    pub fn soffice_command(mut self, cmd: impl Into<String>) -> Self {
        self.config.soffice_command = cmd.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServiceConfig, ConvertError> {
        let c = &self.config;
        if c.max_upload_bytes == 0 {
            return Err(ConvertError::Internal(
                "max_upload_bytes must be ≥ 1".into(),
            ));
        }
        if c.pdf2docx_command.is_empty() || c.soffice_command.is_empty() {
            return Err(ConvertError::Internal(
                "converter commands must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
