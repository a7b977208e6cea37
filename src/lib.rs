//! # docshift
//!
//! A small HTTP service that accepts an uploaded document (PDF or Word) and
//! returns it converted to the other format.
//!
//! ## Why this crate?
//!
//! The actual format transformation is never done here — it is delegated to
//! external Document Converter collaborators (a PDF→Word tool, a manual PDF
//! canvas renderer, an optional office-automation tool). What this crate owns
//! is the part that has a real contract: request validation, temporary-file
//! lifecycle, parameter parsing, and error-to-HTTP-status mapping. Getting
//! those right — in particular the guarantee that staged temporary files are
//! removed on every exit path — is the whole job.
//!
//! ## Pipeline Overview
//!
//! ```text
//! POST /convert | /word-to-pdf
//!  │
//!  ├─ 1. Validate  file present, named, right extension, ≤ 15 MiB
//!  ├─ 2. Stage     bytes → scoped TempDir, output path by suffix substitution
//!  ├─ 3. Dispatch  external Document Converter (never retried)
//!  ├─ 4. Respond   attachment bytes, or {"error": …} with 400/500
//!  └─ 5. Cleanup   drop guard removes both staged paths, success or failure
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docshift::{serve, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::builder().port(5000).build()?;
//!     serve(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Word→PDF strategies
//!
//! Two mutually exclusive renderer implementations, chosen at deployment
//! time via [`config::RendererKind`]:
//!
//! | Strategy | Fidelity | Platform dependency |
//! |----------|----------|---------------------|
//! | `canvas` (default) | bare text, fixed 12-pt font | none |
//! | `soffice` | full styling | headless office suite on PATH |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod converter;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RendererKind, ServiceConfig, ServiceConfigBuilder, MAX_UPLOAD_BYTES};
pub use error::{ConvertError, ConverterError};
pub use options::{ConversionOptions, ImageQuality, Orientation, PageLayout, PageSize};
pub use server::{router, serve, AppState};
