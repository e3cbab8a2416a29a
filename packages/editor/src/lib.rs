//! # Pagecraft Editor
//!
//! Page-editing engine for the Pagecraft page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI: palette, canvas, inspector, toolbar     │
//! └─────────────────────────────────────────────┘
//!                     ↓ actions
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Page (ordered blocks + metadata)         │
//! │  - Mutations (insert/update/move/...)       │
//! │  - UndoStack (bounded page snapshots)       │
//! │  - EditorState (selection, mode, dirty)     │
//! └─────────────────────────────────────────────┘
//!                     ↓ save / publish
//! ┌─────────────────────────────────────────────┐
//! │ PageCoordinator → PageApi (HTTP backend)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Envelope only**: block payloads are carried, never interpreted
//! 2. **Contiguous order**: `blocks[i].order == i` after every mutation
//! 3. **Every edit is a snapshot**: undo/redo walk whole-page snapshots
//! 4. **Failures are local**: a failed request never changes the session
//! 5. **Last writer wins**: no version check against the server
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{BlockData, EditSession, PageCoordinator};
//!
//! let coordinator = PageCoordinator::new(api);
//! let mut session = EditSession::default();
//!
//! coordinator.load(&mut session, "summer-bootcamp").await?;
//!
//! let id = session.add_block(BlockData::text("Join today"), None, None);
//! session.move_block(2, 0);
//! session.undo();
//!
//! coordinator.publish(&mut session).await?;
//! ```

mod api;
mod block;
mod config;
mod coordinator;
mod document;
mod errors;
mod mutations;
mod session;
mod slug;
mod undo_stack;

pub use api::{ApiError, PageApi, PageDraft, PageList, PageQuery, PageUpdate, Pagination};
pub use block::{
    new_block_id, Block, BlockData, BlockStyles, BlockType, ButtonPayload, CardPayload,
    HeroPayload, ImagePayload, SectionPayload, TestimonialPayload, TextPayload, VideoPayload,
    LOCAL_BLOCK_PREFIX,
};
pub use config::EditorConfig;
pub use coordinator::PageCoordinator;
pub use document::{Page, PageRecord, PageStatus, SeoMeta, TEMP_ID_PREFIX};
pub use errors::EditorError;
pub use mutations::{BlockPatch, MetaPatch, Mutation, MutationError};
pub use session::{EditSession, EditorMode, EditorState};
pub use slug::derive_slug;
pub use undo_stack::{UndoStack, DEFAULT_HISTORY_LIMIT};
