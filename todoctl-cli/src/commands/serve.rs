//! HTTP server command
//!
//! Runs the todo API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use todoctl_server::db::create_pool;
use todoctl_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, database_url: &str) -> Result<()> {
    tracing::info!("Starting todoctl server on {}", args.bind);

    let pool = create_pool(database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
