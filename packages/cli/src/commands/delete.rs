use anyhow::Result;
use colored::Colorize;
use tracing::info;

use super::{Context, SlugArgs};

pub async fn delete(args: SlugArgs, ctx: &Context) -> Result<()> {
    ctx.coordinator.api().delete_page(&args.slug).await?;
    info!(slug = %args.slug, "page deleted");

    println!("{} Deleted /{}", "✓".green(), args.slug);
    Ok(())
}
