mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    create, delete, list, publish, set_status, show, Context, CreateArgs, ListArgs, ShowArgs,
    SlugArgs,
};
use pagecraft_editor::PageStatus;
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - manage pages built with the Pagecraft editor
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List pages
    List(ListArgs),

    /// Show a single page and its blocks
    Show(ShowArgs),

    /// Create a new draft page
    Create(CreateArgs),

    /// Publish a page
    Publish(SlugArgs),

    /// Move a page back to draft
    Unpublish(SlugArgs),

    /// Archive a page
    Archive(SlugArgs),

    /// Delete a page and its blocks
    Delete(SlugArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli.command).await;

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let ctx = Context::from_dir(&cwd)?;

    match command {
        Command::List(args) => list(args, &ctx).await,
        Command::Show(args) => show(args, &ctx).await,
        Command::Create(args) => create(args, &ctx).await,
        Command::Publish(args) => publish(args, &ctx).await,
        Command::Unpublish(args) => set_status(args, PageStatus::Draft, &ctx).await,
        Command::Archive(args) => set_status(args, PageStatus::Archived, &ctx).await,
        Command::Delete(args) => delete(args, &ctx).await,
    }
}
