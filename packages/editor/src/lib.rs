//! # Pagesmith Editor
//!
//! Tree editing engine and builder orchestration.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: WebsiteConfig → pages → block forest │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: selection + mutations on the draft  │
//! │  - tree: locate / insert / update / delete  │
//! │  - Mutation: validated, serializable edits  │
//! │  - EditSession: draft, selection, publish   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: block forest → VNode tree         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Pure tree edits**: every mutation builds a new block list; the input
//!    is never touched
//! 2. **Draft isolation**: edits land in the draft; live changes only on
//!    publish, as one assignment
//! 3. **Deepest click wins**: a canvas click selects exactly one block
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagesmith_editor::EditSession;
//! use pagesmith_model::{BlockType, ElementStyle};
//!
//! let mut session = EditSession::new(config);
//! session.select_page("home")?;
//!
//! let section = session.add_block(BlockType::Section)?;
//! let heading = session.add_block(BlockType::Heading)?; // lands inside the section
//!
//! session.update_styles(&section, ElementStyle {
//!     background_color: Some("#112233".into()),
//!     ..Default::default()
//! })?;
//!
//! session.publish();
//! ```

mod errors;
mod intent;
mod mutations;
mod session;
pub mod tree;

pub use errors::EditorError;
pub use intent::{Intent, Outcome};
pub use mutations::{Mutation, MutationError};
pub use session::{DeleteRequest, EditSession, PagePatch, ThemePatch, DELETE_PROMPT};
pub use tree::{
    append_root, delete_node, insert_child, locate, update_node, FieldsPatch, Located,
};
