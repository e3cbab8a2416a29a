use anyhow::Result;
use colored::Colorize;
use pagecraft_editor::{MetaPatch, PageStatus};

use super::{status_label, Context, SlugArgs};

pub async fn publish(args: SlugArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session();
    ctx.coordinator.load(&mut session, &args.slug).await?;
    ctx.coordinator.publish(&mut session).await?;

    if let Some(page) = session.page() {
        println!(
            "{} Published {} (version {})",
            "✓".green(),
            format!("/{}", page.slug).bright_white(),
            page.version_number
        );
    }
    Ok(())
}

/// Load, change status and save through the regular update path
pub async fn set_status(args: SlugArgs, status: PageStatus, ctx: &Context) -> Result<()> {
    let mut session = ctx.session();
    ctx.coordinator.load(&mut session, &args.slug).await?;

    if session.page().map(|p| p.status) == Some(status) {
        println!(
            "{} /{} is already {}",
            "⚠️".yellow(),
            args.slug,
            status_label(status)
        );
        return Ok(());
    }

    session.update_meta(MetaPatch::status(status));
    ctx.coordinator.save(&mut session).await?;
    println!(
        "{} /{} is now {}",
        "✓".green(),
        args.slug,
        status_label(status)
    );
    Ok(())
}
