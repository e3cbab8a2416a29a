//! # Page Mutations
//!
//! Structural operations on a page's block list and metadata.
//!
//! ## Design Principles
//!
//! 1. **Envelope only**: mutations move, copy and replace payloads but never
//!    look inside them
//! 2. **Validated**: `apply` validates first and leaves the page untouched on
//!    error
//! 3. **Contiguous**: every structural mutation renumbers, so
//!    `blocks[i].order == i` afterwards
//!
//! ## Mutation Semantics
//!
//! ### InsertBlock
//! - Appends by default, or inserts before `index` (clamped to the end)
//!
//! ### UpdateBlock
//! - Replaces `data` and/or `styles` wholesale, refreshes `updated_at`
//! - A payload of a different block type is rejected (type is immutable)
//!
//! ### MoveBlock
//! - Positional: remove at `from`, reinsert at `to` (clamped to last index)
//! - Moving a block onto itself is rejected as a no-change
//!
//! ### DuplicateBlock
//! - Copy under `new_id`, placed directly after the original
//!
//! Errors here are not user-facing: the session turns them into silent
//! no-ops, since the UI may race against resets and deletions.

use thiserror::Error;

use crate::block::{Block, BlockData, BlockStyles, BlockType};
use crate::document::{Page, PageStatus, SeoMeta};

/// Partial update for a single block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    /// Replacement payload (must keep the block's type)
    pub data: Option<BlockData>,

    /// `Some(None)` clears the style overrides
    pub styles: Option<Option<BlockStyles>>,
}

impl BlockPatch {
    pub fn data(data: BlockData) -> Self {
        Self {
            data: Some(data),
            styles: None,
        }
    }

    pub fn styles(styles: Option<BlockStyles>) -> Self {
        Self {
            data: None,
            styles: Some(styles),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none() && self.styles.is_none()
    }
}

/// Partial update for page-level metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaPatch {
    pub title: Option<String>,

    /// Only accepted while the page is unsaved
    pub slug: Option<String>,

    pub description: Option<Option<String>>,
    pub seo: Option<SeoMeta>,
    pub status: Option<PageStatus>,
}

impl MetaPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn status(status: PageStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.seo.is_none()
            && self.status.is_none()
    }
}

/// Operations that produce a new page revision
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Insert a fully built block at `index` (or append)
    InsertBlock { block: Block, index: Option<usize> },

    /// Merge fields into an existing block
    UpdateBlock { block_id: String, patch: BlockPatch },

    /// Remove a block
    RemoveBlock { block_id: String },

    /// Reposition the block at `from` to `to`
    MoveBlock { from: usize, to: usize },

    /// Copy a block under `new_id` right after the original
    DuplicateBlock { block_id: String, new_id: String },

    /// Change page metadata
    UpdateMeta { patch: MetaPatch },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Index {index} out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Block {block_id} is {expected}, patch carries {found}")]
    TypeMismatch {
        block_id: String,
        expected: BlockType,
        found: BlockType,
    },

    #[error("Duplicate block id: {0}")]
    DuplicateId(String),

    #[error("Slug cannot change after the page is saved")]
    SlugLocked,

    #[error("Mutation changes nothing")]
    NoChange,
}

impl Mutation {
    /// Apply mutation to the page with validation
    pub fn apply(&self, page: &mut Page) -> Result<(), MutationError> {
        self.validate(page)?;

        match self {
            Mutation::InsertBlock { block, index } => {
                Self::apply_insert(page, block, *index);
            }

            Mutation::UpdateBlock { block_id, patch } => {
                Self::apply_update(page, block_id, patch)?;
            }

            Mutation::RemoveBlock { block_id } => {
                Self::apply_remove(page, block_id)?;
            }

            Mutation::MoveBlock { from, to } => {
                Self::apply_move(page, *from, *to);
            }

            Mutation::DuplicateBlock { block_id, new_id } => {
                Self::apply_duplicate(page, block_id, new_id)?;
            }

            Mutation::UpdateMeta { patch } => {
                Self::apply_meta(page, patch);
            }
        }

        Ok(())
    }

    fn apply_insert(page: &mut Page, block: &Block, index: Option<usize>) {
        let at = index.unwrap_or(page.blocks.len()).min(page.blocks.len());
        page.blocks.insert(at, block.clone());
        page.renumber();
    }

    fn apply_update(page: &mut Page, block_id: &str, patch: &BlockPatch) -> Result<(), MutationError> {
        let block = page
            .block_mut(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;

        if let Some(data) = &patch.data {
            block.data = data.clone();
        }
        if let Some(styles) = &patch.styles {
            block.styles = styles.clone();
        }
        block.touch();
        Ok(())
    }

    fn apply_remove(page: &mut Page, block_id: &str) -> Result<(), MutationError> {
        let pos = page
            .position(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
        page.blocks.remove(pos);
        page.renumber();
        Ok(())
    }

    fn apply_move(page: &mut Page, from: usize, to: usize) {
        let to = to.min(page.blocks.len() - 1);
        let block = page.blocks.remove(from);
        page.blocks.insert(to, block);
        page.renumber();
    }

    fn apply_duplicate(page: &mut Page, block_id: &str, new_id: &str) -> Result<(), MutationError> {
        let pos = page
            .position(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
        let copy = page.blocks[pos].duplicate(new_id.to_string());
        page.blocks.insert(pos + 1, copy);
        page.renumber();
        Ok(())
    }

    fn apply_meta(page: &mut Page, patch: &MetaPatch) {
        if let Some(title) = &patch.title {
            page.title = title.clone();
        }
        if let Some(slug) = &patch.slug {
            page.slug = slug.clone();
        }
        if let Some(description) = &patch.description {
            page.description = description.clone();
        }
        if let Some(seo) = &patch.seo {
            page.seo = seo.clone();
        }
        if let Some(status) = patch.status {
            page.status = status;
        }
    }

    /// Validate without applying
    pub fn validate(&self, page: &Page) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock { block, .. } => {
                if page.block(&block.id).is_some() {
                    return Err(MutationError::DuplicateId(block.id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateBlock { block_id, patch } => {
                let block = page
                    .block(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;

                if patch.is_empty() {
                    return Err(MutationError::NoChange);
                }

                if let Some(data) = &patch.data {
                    if data.block_type() != block.block_type() {
                        return Err(MutationError::TypeMismatch {
                            block_id: block_id.clone(),
                            expected: block.block_type(),
                            found: data.block_type(),
                        });
                    }
                }
                Ok(())
            }

            Mutation::RemoveBlock { block_id } => {
                page.block(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                Ok(())
            }

            Mutation::MoveBlock { from, to } => {
                let len = page.blocks.len();
                if *from >= len {
                    return Err(MutationError::IndexOutOfRange { index: *from, len });
                }
                if (*to).min(len - 1) == *from {
                    return Err(MutationError::NoChange);
                }
                Ok(())
            }

            Mutation::DuplicateBlock { block_id, new_id } => {
                page.block(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                if page.block(new_id).is_some() {
                    return Err(MutationError::DuplicateId(new_id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateMeta { patch } => {
                if patch.is_empty() {
                    return Err(MutationError::NoChange);
                }
                if patch.slug.is_some() && page.is_persisted() {
                    return Err(MutationError::SlugLocked);
                }
                Ok(())
            }
        }
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertBlock { .. } => "insert_block",
            Mutation::UpdateBlock { .. } => "update_block",
            Mutation::RemoveBlock { .. } => "remove_block",
            Mutation::MoveBlock { .. } => "move_block",
            Mutation::DuplicateBlock { .. } => "duplicate_block",
            Mutation::UpdateMeta { .. } => "update_meta",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::new_block_id;

    fn page_with(labels: &[&str]) -> Page {
        let mut page = Page::placeholder();
        for label in labels {
            let mut block = Block::new(BlockData::text(*label), None);
            block.id = label.to_string();
            page.blocks.push(block);
        }
        page.renumber();
        page
    }

    fn ids(page: &Page) -> Vec<&str> {
        page.blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_insert_appends_by_default() {
        let mut page = page_with(&["a", "b"]);
        let block = Block::new(BlockData::text("c"), None);
        let id = block.id.clone();

        Mutation::InsertBlock { block, index: None }.apply(&mut page).unwrap();

        assert_eq!(page.blocks[2].id, id);
        assert!(page.has_contiguous_order());
    }

    #[test]
    fn test_insert_at_index_is_clamped() {
        let mut page = page_with(&["a", "b"]);
        let block = Block::new(BlockData::text("x"), None);
        let id = block.id.clone();

        Mutation::InsertBlock { block, index: Some(99) }.apply(&mut page).unwrap();
        assert_eq!(page.blocks.last().unwrap().id, id);

        let block = Block::new(BlockData::text("y"), None);
        let id = block.id.clone();
        Mutation::InsertBlock { block, index: Some(1) }.apply(&mut page).unwrap();
        assert_eq!(page.blocks[1].id, id);
        assert!(page.has_contiguous_order());
    }

    #[test]
    fn test_move_last_to_front() {
        let mut page = page_with(&["A", "B", "C"]);

        Mutation::MoveBlock { from: 2, to: 0 }.apply(&mut page).unwrap();

        assert_eq!(ids(&page), vec!["C", "A", "B"]);
        let orders: Vec<_> = page.blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_move_validation() {
        let page = page_with(&["A", "B"]);

        assert_eq!(
            Mutation::MoveBlock { from: 5, to: 0 }.validate(&page),
            Err(MutationError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(
            Mutation::MoveBlock { from: 1, to: 7 }.validate(&page),
            Err(MutationError::NoChange)
        );
        assert!(Mutation::MoveBlock { from: 0, to: 7 }.validate(&page).is_ok());
    }

    #[test]
    fn test_remove_renumbers() {
        let mut page = page_with(&["A", "B", "C"]);

        Mutation::RemoveBlock { block_id: "A".into() }.apply(&mut page).unwrap();

        assert_eq!(ids(&page), vec!["B", "C"]);
        assert!(page.has_contiguous_order());
    }

    #[test]
    fn test_duplicate_inserts_after_original() {
        let mut page = page_with(&["A", "B"]);
        let new_id = new_block_id();

        Mutation::DuplicateBlock {
            block_id: "A".into(),
            new_id: new_id.clone(),
        }
        .apply(&mut page)
        .unwrap();

        assert_eq!(ids(&page), vec!["A", new_id.as_str(), "B"]);
        assert_eq!(page.blocks[1].data, page.blocks[0].data);
        assert!(page.has_contiguous_order());
    }

    #[test]
    fn test_update_rejects_type_change() {
        let mut page = page_with(&["A"]);
        let before = page.clone();

        let result = Mutation::UpdateBlock {
            block_id: "A".into(),
            patch: BlockPatch::data(BlockData::image("/x.png")),
        }
        .apply(&mut page);

        assert!(matches!(result, Err(MutationError::TypeMismatch { .. })));
        assert_eq!(page, before);
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let mut page = page_with(&["A"]);
        let before = page.blocks[0].updated_at;

        Mutation::UpdateBlock {
            block_id: "A".into(),
            patch: BlockPatch::data(BlockData::text("changed")),
        }
        .apply(&mut page)
        .unwrap();

        assert_eq!(page.blocks[0].data, BlockData::text("changed"));
        assert!(page.blocks[0].updated_at >= before);
    }

    #[test]
    fn test_slug_locked_after_save() {
        let mut page = page_with(&[]);
        page.id = "42".into();

        let patch = MetaPatch {
            slug: Some("new-slug".into()),
            ..Default::default()
        };
        assert_eq!(
            Mutation::UpdateMeta { patch }.validate(&page),
            Err(MutationError::SlugLocked)
        );
    }

    #[test]
    fn test_missing_block_is_reported() {
        let mut page = page_with(&["A"]);
        let result = Mutation::RemoveBlock { block_id: "gone".into() }.apply(&mut page);
        assert_eq!(result, Err(MutationError::BlockNotFound("gone".into())));
    }
}
