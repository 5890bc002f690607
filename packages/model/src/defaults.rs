//! Factory for freshly created blocks and pages.

use crate::block::{
    Block, BlockKind, BlockType, ButtonContent, HeadingContent, HeroContent, ImageContent,
    StatsContent, TextContent,
};
use crate::id::IdSource;
use crate::site::{Page, PageStatus, PageType};
use crate::style::ElementStyle;

pub const DEFAULT_PAGE_TITLE: &str = "New Page";

/// Default payload a new block of `block_type` starts with.
pub fn default_kind(block_type: BlockType) -> BlockKind {
    match block_type {
        BlockType::Text => BlockKind::Text(TextContent {
            html: Some("<p>Lorem ipsum dolor sit amet.</p>".to_string()),
        }),
        BlockType::Heading => BlockKind::Heading(HeadingContent {
            text: Some("Heading Text".to_string()),
        }),
        BlockType::Button => BlockKind::Button(ButtonContent {
            text: Some("Click Me".to_string()),
            link: Some("#".to_string()),
        }),
        BlockType::Image => BlockKind::Image(ImageContent {
            url: Some("https://via.placeholder.com/600x400".to_string()),
            caption: Some(String::new()),
        }),
        BlockType::Hero => BlockKind::Hero(HeroContent {
            title: Some("Hero Title".to_string()),
            subtitle: Some("Subtitle".to_string()),
        }),
        BlockType::Stats => BlockKind::Stats(StatsContent {
            number: Some("100%".to_string()),
            label: Some("Success Rate".to_string()),
        }),
        other => BlockKind::empty(other),
    }
}

/// Default styles a new block of `block_type` starts with.
pub fn default_styles(block_type: BlockType) -> ElementStyle {
    let vertical = if block_type == BlockType::Section { "40" } else { "10" };

    ElementStyle {
        padding_top: Some(vertical.to_string()),
        padding_bottom: Some(vertical.to_string()),
        padding_left: Some("20".to_string()),
        padding_right: Some("20".to_string()),
        width: (block_type == BlockType::Column).then(|| "100%".to_string()),
        background_color: (block_type == BlockType::Section).then(|| "#ffffff".to_string()),
        ..Default::default()
    }
}

/// Build a block with a fresh id and variant defaults.
pub fn new_block(ids: &mut dyn IdSource, block_type: BlockType) -> Block {
    Block::new(ids.next_id("b"), default_kind(block_type)).with_styles(default_styles(block_type))
}

/// Build an empty custom draft page with a fresh id and slug.
pub fn new_page(ids: &mut dyn IdSource) -> Page {
    let id = ids.next_id("p");
    let slug = format!("page-{}", id.trim_start_matches("p_").replace('_', "-"));

    Page {
        id,
        slug,
        title: DEFAULT_PAGE_TITLE.to_string(),
        page_type: PageType::Custom,
        status: PageStatus::Draft,
        blocks: Vec::new(),
        legacy_content: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;

    #[test]
    fn test_new_section_defaults() {
        let mut ids = IdGenerator::from_seed("t");
        let section = new_block(&mut ids, BlockType::Section);

        assert_eq!(section.id, "b_t_1");
        assert_eq!(section.children().map(|c| c.len()), Some(0));
        assert_eq!(section.styles.padding_top.as_deref(), Some("40"));
        assert_eq!(section.styles.padding_bottom.as_deref(), Some("40"));
        assert_eq!(section.styles.padding_left.as_deref(), Some("20"));
        assert_eq!(section.styles.padding_right.as_deref(), Some("20"));
        assert_eq!(section.styles.background_color.as_deref(), Some("#ffffff"));
        assert_eq!(section.styles.width, None);
    }

    #[test]
    fn test_new_column_is_full_width() {
        let mut ids = IdGenerator::from_seed("t");
        let column = new_block(&mut ids, BlockType::Column);

        assert!(column.is_container());
        assert_eq!(column.styles.width.as_deref(), Some("100%"));
        assert_eq!(column.styles.padding_top.as_deref(), Some("10"));
    }

    #[test]
    fn test_new_heading_content() {
        let mut ids = IdGenerator::from_seed("t");
        let heading = new_block(&mut ids, BlockType::Heading);

        assert_eq!(
            heading.kind,
            BlockKind::Heading(HeadingContent {
                text: Some("Heading Text".to_string())
            })
        );
        assert!(heading.children().is_none());
    }

    #[test]
    fn test_new_page_is_custom_draft() {
        let mut ids = IdGenerator::from_seed("abc");
        let page = new_page(&mut ids);

        assert_eq!(page.id, "p_abc_1");
        assert_eq!(page.slug, "page-abc-1");
        assert_eq!(page.title, DEFAULT_PAGE_TITLE);
        assert_eq!(page.page_type, PageType::Custom);
        assert_eq!(page.status, PageStatus::Draft);
        assert!(page.blocks.is_empty());
    }
}
