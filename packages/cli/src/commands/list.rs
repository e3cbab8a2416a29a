use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{PageQuery, PageStatus};

use super::{status_label, Context};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only pages with this status (draft, published, archived)
    #[arg(short, long)]
    pub status: Option<PageStatus>,

    /// Match against title and slug
    #[arg(long)]
    pub search: Option<String>,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Pages per request
    #[arg(short, long, default_value_t = 20)]
    pub limit: u32,
}

pub async fn list(args: ListArgs, ctx: &Context) -> Result<()> {
    let query = PageQuery {
        status: args.status,
        search: args.search,
        page: args.page.max(1),
        limit: args.limit,
    };

    let result = ctx.coordinator.api().list_pages(&query).await?;

    if result.pages.is_empty() {
        println!("{}", "No pages found".bright_black());
        return Ok(());
    }

    let width = result
        .pages
        .iter()
        .map(|p| p.slug.chars().count())
        .max()
        .unwrap_or(0);

    for page in &result.pages {
        println!(
            "  {:<width$}  {:<9}  {}",
            page.slug.bright_white(),
            status_label(page.status),
            page.title,
            width = width
        );
    }

    let p = &result.pagination;
    println!();
    println!(
        "{}",
        format!(
            "page {}/{} ({} total)",
            p.page,
            p.total_pages.max(1),
            p.total
        )
        .bright_black()
    );

    Ok(())
}
