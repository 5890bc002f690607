//! # Pagesmith Model
//!
//! Data contract for the page builder: the block tree, the website
//! configuration that owns it, and the helpers every other crate leans on
//! (id generation, default blocks, JSON persistence, tree walking).
//!
//! ## Invariants
//!
//! - Pages hold a strict forest of blocks: one parent per block, no sharing.
//! - Block ids are unique across the whole configuration.
//! - Only `section` and `column` blocks carry children, enforced by
//!   [`BlockKind`].
//! - Child order is render order.

pub mod block;
pub mod defaults;
pub mod error;
pub mod id;
mod lenient;
pub mod site;
pub mod store;
pub mod style;
pub mod visitor;

pub use block::{
    Block, BlockId, BlockKind, BlockType, ButtonContent, HeadingContent, HeroContent,
    ImageContent, StatsContent, TextContent,
};
pub use defaults::{default_kind, default_styles, new_block, new_page};
pub use error::{ModelError, ModelResult};
pub use id::{IdGenerator, IdSource};
pub use site::{
    ContactInfo, Feature, HeroCopy, MediaItem, MediaType, MenuItem, MenuKind, Menus, Page,
    PageId, PageStatus, PageType, RadiusScale, Theme, ThemeColors, WebsiteConfig,
};
pub use store::{from_json, load_config, save_config, to_json};
pub use style::ElementStyle;
pub use visitor::{collect_ids, duplicate_ids, Visitor};
