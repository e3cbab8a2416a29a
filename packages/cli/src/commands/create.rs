use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::MetaPatch;

use super::Context;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Page title
    #[arg(short, long)]
    pub title: String,

    /// URL slug (derived from the title when omitted)
    #[arg(short, long)]
    pub slug: Option<String>,

    /// Short description
    #[arg(short, long)]
    pub description: Option<String>,
}

pub async fn create(args: CreateArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session();
    ctx.coordinator.create_new(&mut session);

    session.update_meta(MetaPatch {
        title: Some(args.title),
        slug: args.slug,
        description: args.description.map(Some),
        ..Default::default()
    });

    ctx.coordinator.save(&mut session).await?;

    if let Some(page) = session.page() {
        println!("{} Created {}", "✓".green(), format!("/{}", page.slug).bright_white());
        println!("   Id:     {}", page.id);
        println!("   Status: {}", super::status_label(page.status));
    }
    Ok(())
}
