use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Block, BlockData};

use super::{status_label, Context};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Page slug
    pub slug: String,

    /// Skip fetching blocks
    #[arg(long)]
    pub no_blocks: bool,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let record = ctx
        .coordinator
        .api()
        .fetch_page(&args.slug, !args.no_blocks)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{} {}", record.title.bright_white().bold(), format!("/{}", record.slug).bright_black());
    println!("   Status:  {}", status_label(record.status));
    println!("   Version: {}", record.version_number);
    if let Some(description) = &record.description {
        println!("   About:   {}", description);
    }
    if let Some(published_at) = record.published_at {
        println!("   Published {}", published_at.format("%Y-%m-%d %H:%M"));
    }

    if let Some(blocks) = &record.blocks {
        println!();
        println!("   {} blocks", blocks.len());
        for block in blocks {
            println!("   {:>3}. {}", block.order, describe(block));
        }
    }

    Ok(())
}

fn describe(block: &Block) -> String {
    let kind = block.block_type().to_string();
    let summary = match &block.data {
        BlockData::Text(t) => first_line(t.content.as_deref().unwrap_or_default()),
        BlockData::Hero(h) => h.heading.clone().unwrap_or_default(),
        BlockData::Button(b) => b.label.clone().unwrap_or_default(),
        BlockData::Image(i) => i.src.clone().unwrap_or_default(),
        _ => String::new(),
    };
    if summary.is_empty() {
        kind.cyan().to_string()
    } else {
        format!("{} {}", kind.cyan(), summary)
    }
}

fn first_line(s: &str) -> String {
    let line = s.lines().next().unwrap_or_default();
    if line.chars().count() > 60 {
        format!("{}…", line.chars().take(60).collect::<String>())
    } else {
        line.to_string()
    }
}
