//! Server binary for docshift.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ServiceConfig`, initialises logging once, and serves.

use anyhow::Result;
use clap::Parser;
use docshift::converter::pdf2docx::Pdf2DocxCli;
use docshift::converter::soffice::SofficeRenderer;
use docshift::{serve, RendererKind, ServiceConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "docshift", version, about = "PDF ⇄ Word conversion service")]
struct Args {
    /// Bind host.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bind port.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Word→PDF renderer strategy.
    #[arg(long, value_enum, default_value = "canvas")]
    renderer: RendererArg,

    /// Command for the PDF→Word converter tool.
    #[arg(long, default_value = "pdf2docx")]
    pdf2docx_cmd: String,

    /// Command for the headless office suite (soffice renderer only).
    #[arg(long, default_value = "soffice")]
    soffice_cmd: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum RendererArg {
    Canvas,
    Soffice,
}

impl From<RendererArg> for RendererKind {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::Canvas => RendererKind::Canvas,
            RendererArg::Soffice => RendererKind::Soffice,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docshift=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = ServiceConfig::builder()
        .host(args.host)
        .port(args.port)
        .renderer(args.renderer.into())
        .pdf2docx_command(args.pdf2docx_cmd)
        .soffice_command(args.soffice_cmd)
        .build()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    // startup probes: missing tools are logged, not fatal — each request
    // still surfaces its own conversion failure
    if !Pdf2DocxCli::new(config.pdf2docx_command.clone())
        .is_available()
        .await
    {
        tracing::warn!(
            "'{}' not found on PATH; /convert requests will fail until it is installed",
            config.pdf2docx_command
        );
    }
    if config.renderer == RendererKind::Soffice
        && !SofficeRenderer::new(config.soffice_command.clone())
            .is_available()
            .await
    {
        tracing::warn!(
            "'{}' not found on PATH; /word-to-pdf requests will fail until it is installed",
            config.soffice_command
        );
    }

    tracing::info!(
        "docshift {} — renderer: {:?}, upload limit: {} MiB",
        env!("CARGO_PKG_VERSION"),
        config.renderer,
        config.max_upload_mib()
    );

    serve(config).await.map_err(|e| anyhow::anyhow!("{e}"))
}
