//! todoctl CLI - todo list API server and store commands
//!
//! - `serve`: run the JSON API over HTTP
//! - `list` / `add` / `delete`: work on the same database directly

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

/// Used when neither `--database-url` nor `DATABASE_URL` is set
const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Todo list backend: JSON API server and store commands"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Database URL (SQLite file is created if missing)
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = DEFAULT_DATABASE_URL
    )]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// List all todos
    List(commands::todos::ListArgs),
    /// Add a todo
    Add(commands::todos::AddArgs),
    /// Delete a todo by id
    Delete(commands::todos::DeleteArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, &cli.database_url).await,
        Commands::List(args) => commands::todos::run_list(args, &cli.database_url).await,
        Commands::Add(args) => commands::todos::run_add(args, &cli.database_url).await,
        Commands::Delete(args) => commands::todos::run_delete(args, &cli.database_url).await,
    }
}
