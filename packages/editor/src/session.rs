//! # Edit Session Management
//!
//! An `EditSession` owns everything one editing session needs: the page
//! being edited, its undo history and the transient editor state
//! (selection, preview mode, dirty flag, clipboard).
//!
//! All edits go through [`EditSession::commit`], which applies a
//! [`Mutation`] to a copy of the page and, only if it succeeds, swaps the
//! copy in, records it in history and marks the session dirty. Failed
//! mutations (unknown ids, out-of-range moves) are logged and dropped; the
//! UI is allowed to race against deletions and resets.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::block::{new_block_id, Block, BlockData, BlockStyles};
use crate::config::EditorConfig;
use crate::document::{Page, PageRecord};
use crate::mutations::{BlockPatch, MetaPatch, Mutation, MutationError};
use crate::undo_stack::UndoStack;

/// Edit vs preview toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Edit,
    Preview,
}

/// Transient UI-adjacent state
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub selected_block: Option<String>,
    pub mode: EditorMode,

    /// Unsaved changes since the last successful save
    pub dirty: bool,

    pub clipboard: Option<Block>,
}

impl EditorState {
    pub fn is_preview(&self) -> bool {
        self.mode == EditorMode::Preview
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Edit
    }
}

/// Single page-editing session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    page: Option<Page>,
    history: UndoStack,
    state: EditorState,
}

impl EditSession {
    /// Create an empty session (no page loaded)
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            page: None,
            history: UndoStack::with_max_levels(config.history_limit),
            state: EditorState::default(),
        }
    }

    /// Start editing `page`: seeds history, clears selection and dirty flag
    pub fn load(&mut self, page: Page) {
        debug!(session = %self.id, page = %page.id, blocks = page.blocks.len(), "loading page");
        self.history.seed(page.clone());
        self.page = Some(page);
        self.state.selected_block = None;
        self.state.dirty = false;
    }

    /// Drop the page, history and editor state
    pub fn reset(&mut self) {
        self.page = None;
        self.history.clear();
        self.state = EditorState::default();
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn blocks(&self) -> &[Block] {
        self.page.as_ref().map(|p| p.blocks.as_slice()).unwrap_or(&[])
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.page.as_ref().and_then(|p| p.block(id))
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    pub fn selected_block(&self) -> Option<&str> {
        self.state.selected_block.as_deref()
    }

    // --- mutations ---------------------------------------------------------

    /// Apply a mutation as a new history entry. Returns whether it applied.
    pub fn commit(&mut self, mutation: Mutation) -> bool {
        let Some(current) = self.page.as_ref() else {
            debug!(session = %self.id, mutation = mutation.name(), "no page loaded, ignoring");
            return false;
        };

        let mut next = current.clone();
        match mutation.apply(&mut next) {
            Ok(()) => {
                self.history.record(next.clone());
                self.page = Some(next);
                self.state.dirty = true;
                debug!(
                    session = %self.id,
                    mutation = mutation.name(),
                    history_index = self.history.index(),
                    "applied"
                );
                true
            }
            Err(err @ (MutationError::TypeMismatch { .. } | MutationError::SlugLocked)) => {
                warn!(session = %self.id, mutation = mutation.name(), error = %err, "rejected");
                false
            }
            Err(err) => {
                debug!(session = %self.id, mutation = mutation.name(), error = %err, "no change");
                false
            }
        }
    }

    /// Add a block at `index` (or at the end). Returns the new block id.
    pub fn add_block(
        &mut self,
        data: BlockData,
        index: Option<usize>,
        styles: Option<BlockStyles>,
    ) -> Option<String> {
        let block = Block::new(data, styles);
        let id = block.id.clone();
        self.commit(Mutation::InsertBlock { block, index }).then_some(id)
    }

    pub fn update_block(&mut self, block_id: &str, patch: BlockPatch) -> bool {
        self.commit(Mutation::UpdateBlock {
            block_id: block_id.to_string(),
            patch,
        })
    }

    pub fn delete_block(&mut self, block_id: &str) -> bool {
        let removed = self.commit(Mutation::RemoveBlock {
            block_id: block_id.to_string(),
        });
        if removed && self.state.selected_block.as_deref() == Some(block_id) {
            self.state.selected_block = None;
        }
        removed
    }

    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        self.commit(Mutation::MoveBlock { from, to })
    }

    /// Clone a block right after itself. Returns the copy's id.
    pub fn duplicate_block(&mut self, block_id: &str) -> Option<String> {
        let new_id = new_block_id();
        self.commit(Mutation::DuplicateBlock {
            block_id: block_id.to_string(),
            new_id: new_id.clone(),
        })
        .then_some(new_id)
    }

    pub fn update_meta(&mut self, patch: MetaPatch) -> bool {
        self.commit(Mutation::UpdateMeta { patch })
    }

    // --- clipboard ---------------------------------------------------------

    /// Put a copy of the block on the clipboard (not an edit)
    pub fn copy_block(&mut self, block_id: &str) -> bool {
        match self.block(block_id).cloned() {
            Some(block) => {
                self.state.clipboard = Some(block);
                true
            }
            None => false,
        }
    }

    /// Insert the clipboard block after the selection, or at the end
    pub fn paste_block(&mut self) -> Option<String> {
        let source = self.state.clipboard.as_ref()?;
        let block = source.duplicate(new_block_id());
        let id = block.id.clone();

        let index = self
            .state
            .selected_block
            .as_deref()
            .and_then(|sel| self.page.as_ref()?.position(sel))
            .map(|pos| pos + 1);

        self.commit(Mutation::InsertBlock { block, index }).then_some(id)
    }

    // --- history -----------------------------------------------------------

    /// Step back one snapshot. Counts as an unsaved change.
    pub fn undo(&mut self) -> bool {
        if self.page.is_none() {
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.page = Some(snapshot.clone());
                self.state.dirty = true;
                self.retain_selection();
                debug!(session = %self.id, history_index = self.history.index(), "undo");
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Counts as an unsaved change.
    pub fn redo(&mut self) -> bool {
        if self.page.is_none() {
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.page = Some(snapshot.clone());
                self.state.dirty = true;
                self.retain_selection();
                debug!(session = %self.id, history_index = self.history.index(), "redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.page.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.page.is_some() && self.history.can_redo()
    }

    // --- selection & mode --------------------------------------------------

    /// Select a block; unknown ids are ignored
    pub fn select_block(&mut self, block_id: &str) -> bool {
        if self.block(block_id).is_none() {
            return false;
        }
        self.state.selected_block = Some(block_id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_block = None;
    }

    pub fn set_preview(&mut self, preview: bool) {
        self.state.mode = if preview {
            EditorMode::Preview
        } else {
            EditorMode::Edit
        };
    }

    pub fn toggle_preview(&mut self) {
        self.set_preview(!self.state.is_preview());
    }

    // --- persistence hooks -------------------------------------------------

    /// Fold a create response into the local page and restart history from
    /// it, so undo can never resurrect the unsaved identity. Local blocks are
    /// kept when the response carries none.
    pub(crate) fn adopt_created(&mut self, record: PageRecord) {
        let page = match self.page.take() {
            Some(mut page) => {
                page.merge_record(record);
                page
            }
            None => Page::from(record),
        };
        self.history.seed(page.clone());
        self.page = Some(page);
        self.state.dirty = false;
        self.retain_selection();
    }

    /// Fold a server response into the current page and mark it clean
    pub(crate) fn merge_remote(&mut self, record: PageRecord) {
        if let Some(page) = self.page.as_mut() {
            page.merge_record(record);
            self.history.replace_current(page.clone());
        } else {
            let page = Page::from(record);
            self.history.seed(page.clone());
            self.page = Some(page);
        }
        self.state.dirty = false;
        self.retain_selection();
    }

    fn retain_selection(&mut self) {
        let still_exists = match (&self.state.selected_block, &self.page) {
            (Some(id), Some(page)) => page.block(id).is_some(),
            (Some(_), None) => false,
            (None, _) => return,
        };
        if !still_exists {
            self.state.selected_block = None;
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
