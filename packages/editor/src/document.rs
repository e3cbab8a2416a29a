//! # Page Document
//!
//! A page is an ordered list of blocks plus metadata and the server's
//! version counter.
//!
//! Pages exist in two flavours:
//! - **Unsaved**: created locally in "create" mode, id prefixed `temp_`
//! - **Persisted**: loaded from or saved to the backend, server-issued id
//!
//! ## Lifecycle
//!
//! ```text
//! placeholder / fetch → Edit (mutations) → save / publish
//!        ↓                    ↓                  ↓
//!    temp_ id            new snapshot       server id + version
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::block::Block;
use crate::errors::EditorError;

/// Prefix for ids of pages that have never been saved
pub const TEMP_ID_PREFIX: &str = "temp_";

/// Page lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for PageStatus {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(EditorError::InvalidStatus(s.to_string())),
        }
    }
}

/// SEO metadata carried alongside the page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoMeta {
    #[serde(default)]
    pub meta_title: Option<String>,

    #[serde(default)]
    pub meta_description: Option<String>,

    #[serde(default)]
    pub meta_keywords: Option<String>,

    #[serde(default)]
    pub og_image: Option<String>,
}

/// Editable page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PageRecord")]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,

    #[serde(flatten)]
    pub seo: SeoMeta,

    pub status: PageStatus,

    /// Blocks in display order; `blocks[i].order == i`
    pub blocks: Vec<Block>,

    /// Server-side version counter (incremented on every successful save)
    pub version_number: u64,

    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Page {
    /// In-memory page for "create new page" mode
    pub fn placeholder() -> Self {
        Self {
            id: format!("{}{}", TEMP_ID_PREFIX, Uuid::new_v4().simple()),
            slug: String::new(),
            title: String::new(),
            description: None,
            seo: SeoMeta::default(),
            status: PageStatus::Draft,
            blocks: Vec::new(),
            version_number: 0,
            created_by: None,
            updated_by: None,
            created_at: None,
            updated_at: None,
            published_at: None,
        }
    }

    /// Whether the backend has issued an id for this page
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty() && !self.id.starts_with(TEMP_ID_PREFIX)
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Reassign `order = index` for every block
    pub fn renumber(&mut self) {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.order = index;
        }
    }

    /// Check the contiguity invariant
    pub fn has_contiguous_order(&self) -> bool {
        self.blocks.iter().enumerate().all(|(i, b)| b.order == i)
    }

    /// Fold a server response into this page.
    ///
    /// Metadata and version always come from the server. Blocks are only
    /// replaced when the response carried them.
    pub fn merge_record(&mut self, record: PageRecord) {
        self.id = record.id;
        if !record.slug.is_empty() {
            self.slug = record.slug;
        }
        self.title = record.title;
        self.description = record.description;
        self.seo = record.seo;
        self.status = record.status;
        self.version_number = record.version_number;
        self.created_by = record.created_by.or(self.created_by.take());
        self.updated_by = record.updated_by;
        self.created_at = record.created_at.or(self.created_at);
        self.updated_at = record.updated_at;
        self.published_at = record.published_at;

        if let Some(blocks) = record.blocks {
            self.blocks = normalize_blocks(blocks);
        }
    }
}

/// Page as returned by the API. `blocks` is absent on metadata-only fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,

    #[serde(default, deserialize_with = "de_null_string")]
    pub slug: String,

    #[serde(default, deserialize_with = "de_null_string")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(flatten)]
    pub seo: SeoMeta,

    #[serde(default)]
    pub status: PageStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,

    #[serde(default)]
    pub version_number: u64,

    #[serde(default, deserialize_with = "de_opt_id")]
    pub created_by: Option<String>,

    #[serde(default, deserialize_with = "de_opt_id")]
    pub updated_by: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl From<PageRecord> for Page {
    fn from(record: PageRecord) -> Self {
        Self {
            id: record.id,
            slug: record.slug,
            title: record.title,
            description: record.description,
            seo: record.seo,
            status: record.status,
            blocks: normalize_blocks(record.blocks.unwrap_or_default()),
            version_number: record.version_number,
            created_by: record.created_by,
            updated_by: record.updated_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
            published_at: record.published_at,
        }
    }
}

/// Sort by the server's `order` (stable for ties) and renumber from 0
fn normalize_blocks(mut blocks: Vec<Block>) -> Vec<Block> {
    blocks.sort_by_key(|b| b.order);
    for (index, block) in blocks.iter_mut().enumerate() {
        block.order = index;
    }
    blocks
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Accept ids sent either as strings or as integers
pub(crate) fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn de_opt_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

fn de_null_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
