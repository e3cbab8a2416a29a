//! # Page API Contract
//!
//! The editor talks to the backend only through [`PageApi`]. The HTTP
//! implementation lives in `pagecraft-client`; tests use in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::Block;
use crate::document::{Page, PageRecord, PageStatus, SeoMeta};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDraft {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,

    #[serde(flatten)]
    pub seo: SeoMeta,

    pub status: PageStatus,
    pub blocks: Vec<Block>,
}

impl PageDraft {
    /// Draft carrying the page's content under the given slug
    pub fn from_page(page: &Page, slug: String) -> Self {
        Self {
            slug,
            title: page.title.clone(),
            description: page.description.clone(),
            seo: page.seo.clone(),
            status: page.status,
            blocks: page.blocks.clone(),
        }
    }
}

/// Body of an update request; absent fields are left alone by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(flatten)]
    pub seo: Option<SeoMeta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PageStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
}

impl PageUpdate {
    /// Every mutable field of the page, including the full block array
    pub fn full(page: &Page) -> Self {
        Self {
            title: Some(page.title.clone()),
            description: Some(page.description.clone()),
            seo: Some(page.seo.clone()),
            status: Some(page.status),
            blocks: Some(page.blocks.clone()),
        }
    }

    pub fn status(status: PageStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Filters for listing pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PageStatus>,

    /// Free text matched against title and slug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    pub page: u32,
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            page: 1,
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,

    #[serde(alias = "totalPages")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageList {
    pub pages: Vec<PageRecord>,

    #[serde(default)]
    pub pagination: Pagination,
}

/// Backend operations the editor depends on
#[async_trait]
pub trait PageApi: Send + Sync {
    /// Fetch a page; `include_blocks = false` returns metadata only
    async fn fetch_page(&self, slug: &str, include_blocks: bool) -> Result<PageRecord, ApiError>;

    /// Persist a new page; the response carries the server id and version
    async fn create_page(&self, draft: &PageDraft) -> Result<PageRecord, ApiError>;

    /// Update an existing page; the response carries the new version
    async fn update_page(&self, slug: &str, update: &PageUpdate) -> Result<PageRecord, ApiError>;

    async fn list_pages(&self, query: &PageQuery) -> Result<PageList, ApiError>;

    /// Remove a page together with its blocks and versions
    async fn delete_page(&self, slug: &str) -> Result<(), ApiError>;
}
