//! Direct store commands: list, add, delete
//!
//! These talk to the database through the same repository the HTTP API
//! uses, so validation and error semantics match.

use anyhow::{Context, Result};
use clap::Parser;
use todoctl_server::db::{self, SqlitePool};
use todoctl_server::models::{NewTodo, Todo, TodoDescription, TodoId, TodoTitle};
use todoctl_server::{DbError, TodoRepo};

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Title of the new todo
    pub title: String,

    /// Optional longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Mark as already completed
    #[arg(long)]
    pub completed: bool,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Id of the todo to delete
    pub id: TodoId,
}

pub async fn run_list(args: ListArgs, database_url: &str) -> Result<()> {
    let pool = open_store(database_url).await?;
    let todos = TodoRepo::new(&pool).list_all().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&todos)?);
    } else if todos.is_empty() {
        println!("No todos.");
    } else {
        for todo in &todos {
            println!("{}", format_row(todo));
        }
    }

    Ok(())
}

pub async fn run_add(args: AddArgs, database_url: &str) -> Result<()> {
    let title = TodoTitle::new(&args.title)?;
    let description = match args.description.as_deref() {
        Some(text) => TodoDescription::parse(text)?,
        None => None,
    };

    let pool = open_store(database_url).await?;
    let todo = TodoRepo::new(&pool)
        .create(
            NewTodo::new(title)
                .with_description(description)
                .completed(args.completed),
        )
        .await?;

    println!("{}", format_row(&todo));
    Ok(())
}

pub async fn run_delete(args: DeleteArgs, database_url: &str) -> Result<()> {
    let pool = open_store(database_url).await?;

    match TodoRepo::new(&pool).delete(args.id).await {
        Ok(()) => {
            println!("todo {} deleted", args.id);
            Ok(())
        }
        Err(DbError::NotFound { .. }) => anyhow::bail!("todo {} not found", args.id),
        Err(err) => Err(err).context("Failed to delete todo"),
    }
}

async fn open_store(database_url: &str) -> Result<SqlitePool> {
    db::open(database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))
}

fn format_row(todo: &Todo) -> String {
    let mark = if todo.completed { "x" } else { " " };
    match &todo.description {
        Some(description) => format!("{:>4} [{}] {} - {}", todo.id, mark, todo.title, description),
        None => format!("{:>4} [{}] {}", todo.id, mark, todo.title),
    }
}
