//! In-memory stand-in for the page backend

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use pagecraft_editor::{
    ApiError, Block, PageApi, PageDraft, PageList, PageQuery, PageRecord, PageStatus, PageUpdate,
    Pagination, SeoMeta,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Fake backend keyed by slug. Assigns numeric ids, server-side block ids
/// and bumps `version_number` on every write, like the real API.
#[derive(Default)]
pub struct FakePageApi {
    pages: Mutex<BTreeMap<String, PageRecord>>,
    next_id: AtomicU64,
    fail_next: Mutex<Option<ApiError>>,
    calls: Mutex<Vec<String>>,
    omit_blocks: bool,
}

impl FakePageApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, record: PageRecord) -> Self {
        self.pages.lock().unwrap().insert(record.slug.clone(), record);
        self
    }

    /// Answer creates and updates with metadata only, like servers that do
    /// not echo the block array
    pub fn omitting_blocks(mut self) -> Self {
        self.omit_blocks = true;
        self
    }

    fn respond(&self, mut record: PageRecord) -> PageRecord {
        if self.omit_blocks {
            record.blocks = None;
        }
        record
    }

    /// Make the next request fail with `err`
    pub fn fail_next(&self, err: ApiError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self, slug: &str) -> Option<PageRecord> {
        self.pages.lock().unwrap().get(slug).cloned()
    }

    fn enter(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn assign_block_ids(&self, page_id: &str, blocks: &[Block]) -> Vec<Block> {
        blocks
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let mut b = b.clone();
                if b.is_local() {
                    b.id = format!("srv-{}-{}", page_id, self.next_id.fetch_add(1, Ordering::SeqCst));
                }
                b.order = i;
                b
            })
            .collect()
    }
}

#[async_trait]
impl PageApi for FakePageApi {
    async fn fetch_page(&self, slug: &str, include_blocks: bool) -> Result<PageRecord, ApiError> {
        self.enter(format!("fetch {}", slug))?;
        let mut record = self
            .stored(slug)
            .ok_or_else(|| ApiError::NotFound(slug.to_string()))?;
        if !include_blocks {
            record.blocks = None;
        }
        Ok(record)
    }

    async fn create_page(&self, draft: &PageDraft) -> Result<PageRecord, ApiError> {
        self.enter(format!("create {}", draft.slug))?;
        if self.pages.lock().unwrap().contains_key(&draft.slug) {
            return Err(ApiError::Status {
                status: 409,
                message: "slug already exists".into(),
            });
        }

        let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1000).to_string();
        let now = Utc::now();
        let record = PageRecord {
            blocks: Some(self.assign_block_ids(&id, &draft.blocks)),
            id,
            slug: draft.slug.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            seo: draft.seo.clone(),
            status: draft.status,
            version_number: 1,
            created_by: Some("admin".into()),
            updated_by: Some("admin".into()),
            created_at: Some(now),
            updated_at: Some(now),
            published_at: (draft.status == PageStatus::Published).then_some(now),
        };
        self.pages.lock().unwrap().insert(record.slug.clone(), record.clone());
        Ok(self.respond(record))
    }

    async fn update_page(&self, slug: &str, update: &PageUpdate) -> Result<PageRecord, ApiError> {
        self.enter(format!("update {}", slug))?;
        let mut record = self
            .stored(slug)
            .ok_or_else(|| ApiError::NotFound(slug.to_string()))?;

        if let Some(title) = &update.title {
            record.title = title.clone();
        }
        if let Some(description) = &update.description {
            record.description = description.clone();
        }
        if let Some(seo) = &update.seo {
            record.seo = seo.clone();
        }
        if let Some(status) = update.status {
            if status == PageStatus::Published && record.published_at.is_none() {
                record.published_at = Some(Utc::now());
            }
            record.status = status;
        }
        if let Some(blocks) = &update.blocks {
            record.blocks = Some(self.assign_block_ids(&record.id, blocks));
        }
        record.version_number += 1;
        record.updated_at = Some(Utc::now());

        self.pages.lock().unwrap().insert(slug.to_string(), record.clone());
        Ok(self.respond(record))
    }

    async fn list_pages(&self, query: &PageQuery) -> Result<PageList, ApiError> {
        self.enter("list".to_string())?;
        let pages = self.pages.lock().unwrap();
        let matching: Vec<PageRecord> = pages
            .values()
            .filter(|p| query.status.map_or(true, |s| p.status == s))
            .filter(|p| {
                query.search.as_deref().map_or(true, |q| {
                    let q = q.to_lowercase();
                    p.title.to_lowercase().contains(&q) || p.slug.contains(&q)
                })
            })
            .cloned()
            .map(|mut p| {
                p.blocks = None;
                p
            })
            .collect();

        let total = matching.len() as u64;
        let limit = query.limit.max(1);
        let start = ((query.page.max(1) - 1) * limit) as usize;
        Ok(PageList {
            pages: matching.into_iter().skip(start).take(limit as usize).collect(),
            pagination: Pagination {
                page: query.page,
                limit,
                total,
                total_pages: ((total + limit as u64 - 1) / limit as u64) as u32,
            },
        })
    }

    async fn delete_page(&self, slug: &str) -> Result<(), ApiError> {
        self.enter(format!("delete {}", slug))?;
        self.pages
            .lock()
            .unwrap()
            .remove(slug)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(slug.to_string()))
    }
}

/// Stored page record with the given blocks
pub fn record(id: &str, slug: &str, title: &str, blocks: Vec<Block>) -> PageRecord {
    PageRecord {
        id: id.to_string(),
        slug: slug.to_string(),
        title: title.to_string(),
        description: None,
        seo: SeoMeta::default(),
        status: PageStatus::Draft,
        blocks: Some(blocks),
        version_number: 1,
        created_by: None,
        updated_by: None,
        created_at: None,
        updated_at: None,
        published_at: None,
    }
}

/// Block with a fixed, server-looking id
pub fn server_block(id: &str, order: usize, data: pagecraft_editor::BlockData) -> Block {
    let mut block = Block::new(data, None);
    block.id = id.to_string();
    block.order = order;
    block
}
