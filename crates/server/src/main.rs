//! wxmd MCP server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;
use wxmd_convert::{Converter, PipelineConfig};
use wxmd_core::AppConfig;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        mode = ?config.mode,
        reject_unsafe = config.reject_unsafe,
        "Starting wxmd server on stdio transport"
    );

    let converter = Arc::new(Converter::new(PipelineConfig::from(&config)));
    let handler = handler::WxmdServer::new(converter, config.max_markdown_bytes);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
