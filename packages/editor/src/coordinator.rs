//! # Persistence Coordinator
//!
//! Moves pages between an [`EditSession`] and the backend.
//!
//! ```text
//! load(slug)  ── fetch ──→ session.load          (history reseeded, clean)
//! create_new  ─────────→ session.load(placeholder)
//! save        ── unsaved? ── yes → POST   → adopt server copy (reseed)
//!                        └── no  → PUT    → merge response
//! publish     ── save → PUT {status: published} → merge
//! save_as     ── POST copy under new title/slug → adopt
//! ```
//!
//! Every request is built from the session up front and the session is only
//! touched once the response is in. A failed request leaves the page, the
//! history and the dirty flag exactly as they were; retrying is up to the
//! caller.
//!
//! There is no version check before an update: the last response wins.

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{ApiError, PageApi, PageDraft, PageUpdate};
use crate::document::{Page, PageStatus};
use crate::errors::EditorError;
use crate::session::EditSession;
use crate::slug::derive_slug;

pub struct PageCoordinator {
    api: Arc<dyn PageApi>,
}

impl PageCoordinator {
    pub fn new(api: Arc<dyn PageApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<dyn PageApi> {
        &self.api
    }

    /// Fetch a page by slug and start editing it
    pub async fn load(&self, session: &mut EditSession, slug: &str) -> Result<(), EditorError> {
        match self.api.fetch_page(slug, true).await {
            Ok(record) => {
                let page = Page::from(record);
                info!(slug, version = page.version_number, blocks = page.blocks.len(), "page loaded");
                session.load(page);
                Ok(())
            }
            Err(ApiError::NotFound(_)) => {
                warn!(slug, "page not found");
                Err(EditorError::NotFound(slug.to_string()))
            }
            Err(err) => {
                warn!(slug, error = %err, "failed to load page");
                Err(err.into())
            }
        }
    }

    /// Start a new, unsaved page. No request is made.
    pub fn create_new(&self, session: &mut EditSession) {
        session.load(Page::placeholder());
    }

    /// Persist the session's page: create it if unsaved, update otherwise
    pub async fn save(&self, session: &mut EditSession) -> Result<(), EditorError> {
        let page = session.page().ok_or(EditorError::NoPage)?;

        if page.is_persisted() {
            self.update(session).await
        } else {
            let slug = resolve_slug(&page.title, &page.slug)?;
            let draft = PageDraft::from_page(page, slug);
            self.create(session, draft).await
        }
    }

    /// Save, then flip the page to published
    pub async fn publish(&self, session: &mut EditSession) -> Result<(), EditorError> {
        self.save(session).await?;

        let slug = session.page().ok_or(EditorError::NoPage)?.slug.clone();
        match self.api.update_page(&slug, &PageUpdate::status(PageStatus::Published)).await {
            Ok(record) => {
                info!(slug = %slug, version = record.version_number, "page published");
                session.merge_remote(record);
                Ok(())
            }
            Err(err) => {
                warn!(slug = %slug, error = %err, "failed to publish page");
                Err(err.into())
            }
        }
    }

    /// Create a new page from the current blocks under another title/slug.
    /// The session switches over to the new page.
    pub async fn save_page_as(
        &self,
        session: &mut EditSession,
        title: &str,
        slug: &str,
    ) -> Result<(), EditorError> {
        let page = session.page().ok_or(EditorError::NoPage)?;
        let slug = resolve_slug(title, slug)?;

        let mut draft = PageDraft::from_page(page, slug);
        draft.title = title.trim().to_string();
        draft.status = PageStatus::Draft;

        self.create(session, draft).await
    }

    async fn create(&self, session: &mut EditSession, draft: PageDraft) -> Result<(), EditorError> {
        match self.api.create_page(&draft).await {
            Ok(record) => {
                info!(id = %record.id, slug = %record.slug, version = record.version_number, "page created");
                session.adopt_created(record);
                Ok(())
            }
            Err(err) => {
                warn!(slug = %draft.slug, error = %err, "failed to create page");
                Err(err.into())
            }
        }
    }

    async fn update(&self, session: &mut EditSession) -> Result<(), EditorError> {
        let page = session.page().ok_or(EditorError::NoPage)?;
        let slug = page.slug.clone();
        let update = PageUpdate::full(page);

        match self.api.update_page(&slug, &update).await {
            Ok(record) => {
                info!(slug = %slug, version = record.version_number, "page saved");
                session.merge_remote(record);
                Ok(())
            }
            Err(err) => {
                warn!(slug = %slug, error = %err, "failed to save page");
                Err(err.into())
            }
        }
    }
}

/// Explicit slug if given, otherwise one derived from the title
fn resolve_slug(title: &str, slug: &str) -> Result<String, EditorError> {
    let slug = slug.trim();
    if !slug.is_empty() {
        return Ok(slug.to_string());
    }

    if title.trim().is_empty() {
        return Err(EditorError::Validation(
            "a title or slug is required".to_string(),
        ));
    }

    let derived = derive_slug(title);
    if derived.is_empty() {
        return Err(EditorError::Validation(format!(
            "cannot derive a slug from title {:?}",
            title
        )));
    }
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slug_prefers_explicit() {
        assert_eq!(resolve_slug("Ignored", " my-page ").unwrap(), "my-page");
    }

    #[test]
    fn test_resolve_slug_derives_from_title() {
        assert_eq!(resolve_slug("신규 페이지!!", "").unwrap(), "신규-페이지");
    }

    #[test]
    fn test_resolve_slug_requires_something() {
        assert!(matches!(resolve_slug("", ""), Err(EditorError::Validation(_))));
        assert!(matches!(resolve_slug("???", ""), Err(EditorError::Validation(_))));
    }
}
