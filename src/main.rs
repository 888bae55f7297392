use anyhow::Context;
use bun_docs_mcp::cli::Cli;
use bun_docs_mcp::corpus::detect_bun_version;
use bun_docs_mcp::{Config, CorpusLocator, DocIndex, DocServer, TarballFetcher};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::io::IsTerminal;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bun_docs_mcp::tracing::init();

    let config = Config::from_cli(&cli);
    let locator = CorpusLocator::new(
        config.local_docs_dir.clone(),
        config.cache_root.clone(),
        TarballFetcher::new(config.archive_url.clone()),
    );

    // Nothing is piped in; report where docs would live instead of blocking on stdin.
    if std::io::stdin().is_terminal() {
        let version = match &config.bun_version {
            Some(version) => Some(version.clone()),
            None => detect_bun_version().await.ok(),
        };
        let location = version
            .as_deref()
            .and_then(|v| locator.cache_dir(v))
            .or_else(|| config.cache_root.clone());
        match location {
            Some(dir) => println!("bun-docs-mcp cache: {}", dir.display()),
            None => println!("bun-docs-mcp cache: unavailable (no home directory)"),
        }
        println!("Run from an MCP client to serve documentation over stdio.");
        return Ok(());
    }

    let version = match config.bun_version.clone() {
        Some(version) => version,
        None => detect_bun_version().await?,
    };

    // Dropping the locate future on Ctrl-C removes any partially fetched staging directory.
    let location = tokio::select! {
        location = locator.locate(&version) => location
            .with_context(|| format!("Failed to locate documentation for Bun {}", version))?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("Interrupted while fetching documentation"),
    };

    let settings = config.index.clone();
    let dir = location.dir.clone();
    let index = tokio::task::spawn_blocking(move || DocIndex::build(&dir, &settings))
        .await
        .context("Index build task failed")?
        .with_context(|| {
            format!(
                "Failed to index documentation at {}",
                location.dir.display()
            )
        })?;

    tracing::info!(
        version = %location.version,
        source = ?location.source,
        resources = index.len(),
        "Starting bun-docs-mcp MCP server"
    );

    let server = DocServer::new(Arc::new(index));
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
