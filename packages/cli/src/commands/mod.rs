pub mod create;
pub mod delete;
pub mod list;
pub mod publish;
pub mod show;

pub use create::{create, CreateArgs};
pub use delete::delete;
pub use list::{list, ListArgs};
pub use publish::{publish, set_status};
pub use show::{show, ShowArgs};

use anyhow::{Context as _, Result};
use clap::Args;
use colored::{ColoredString, Colorize};
use pagecraft_client::{ClientConfig, HttpPageApi};
use pagecraft_editor::{EditSession, PageCoordinator, PageStatus};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Arguments for commands that act on one page
#[derive(Args, Debug)]
pub struct SlugArgs {
    /// Page slug
    pub slug: String,
}

/// Everything a command needs to talk to the backend
pub struct Context {
    pub config: ClientConfig,
    pub coordinator: PageCoordinator,
}

impl Context {
    pub fn from_dir(cwd: &Path) -> Result<Self> {
        let config = ClientConfig::load(cwd).context("Failed to load pagecraft.config.json")?;
        debug!(api = %config.api_base_url, "using page api");

        let api = HttpPageApi::new(&config)?;
        Ok(Self {
            coordinator: PageCoordinator::new(Arc::new(api)),
            config,
        })
    }

    pub fn session(&self) -> EditSession {
        EditSession::new(&self.config.editor)
    }
}

pub(crate) fn status_label(status: PageStatus) -> ColoredString {
    match status {
        PageStatus::Draft => "draft".yellow(),
        PageStatus::Published => "published".green(),
        PageStatus::Archived => "archived".bright_black(),
    }
}
