//! # Tree Renderer
//!
//! One recursive walker renders a block tree for both the public site and
//! the editor canvas. [`RenderMode`] is threaded through every call.
//!
//! Every block is wrapped in a `div` keyed by its id that carries the
//! resolved styles. In editor mode the wrapper also gets a `Select`
//! binding, the selection/hover classes, a type badge when selected, and
//! empty-container placeholders. Static buttons bind `Navigate` with their
//! raw link; editor buttons bind nothing, so a click selects the button's
//! wrapper instead of following the link.

use crate::css::resolve_styles;
use crate::gesture::Gesture;
use crate::vdom::{VNode, VirtualPage};
use pagesmith_model::{
    Block, BlockKind, BlockType, ButtonContent, HeroContent, ImageContent, Page, StatsContent,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const EMPTY_SECTION_HINT: &str = "Empty Section (Add Columns or Widgets)";
pub const EMPTY_COLUMN_HINT: &str = "Empty Column";
pub const EMPTY_PAGE_HINT: &str = "Add a Section to start building";
/// Marks migrated HTML inside a legacy page body.
pub const LEGACY_MARKER: &str = "legacy content";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Public display, no editing affordances.
    #[default]
    Static,
    /// Interactive canvas: selectable blocks, badges, placeholders.
    Editor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// Block currently selected in the editor.
    pub selected: Option<String>,
}

impl RenderOptions {
    pub fn static_site() -> Self {
        Self::default()
    }

    pub fn editor(selected: Option<&str>) -> Self {
        Self {
            mode: RenderMode::Editor,
            selected: selected.map(str::to_string),
        }
    }

    pub fn is_editor(&self) -> bool {
        self.mode == RenderMode::Editor
    }

    fn is_selected(&self, id: &str) -> bool {
        self.is_editor() && self.selected.as_deref() == Some(id)
    }
}

/// Render a page into a virtual page with a single root node.
pub fn render_page(page: &Page, options: &RenderOptions) -> VirtualPage {
    debug!(page_id = %page.id, mode = ?options.mode, blocks = page.blocks.len(), "Rendering page");

    let mut root = VNode::element("div").with_class("pb-page");
    if options.is_editor() {
        root = root.with_class("pb-editor").on_click(Gesture::ClearSelection);
    }

    let legacy = page.legacy_content.as_deref().filter(|html| !html.is_empty());
    let body = match legacy {
        Some(html) if page.blocks.is_empty() => render_legacy(&page.title, html),
        _ => {
            let mut list = VNode::element("div")
                .with_class("pb-blocks")
                .with_children(render_blocks(&page.blocks, options));
            if page.blocks.is_empty() && options.is_editor() {
                list = list.with_child(placeholder("pb-empty-page", EMPTY_PAGE_HINT));
            }
            list
        }
    };

    VirtualPage {
        page_id: page.id.clone(),
        title: page.title.clone(),
        nodes: vec![root.with_child(body)],
    }
}

pub fn render_blocks(blocks: &[Block], options: &RenderOptions) -> Vec<VNode> {
    blocks.iter().map(|block| render_block(block, options)).collect()
}

/// Render one block and its subtree.
pub fn render_block(block: &Block, options: &RenderOptions) -> VNode {
    let mut wrapper = VNode::element("div")
        .with_key(block.id.as_str())
        .with_attr("id", block.id.as_str())
        .with_attr("data-block-type", block.type_name())
        .with_class("pb-block")
        .with_styles(resolve_styles(&block.styles));

    if options.is_editor() {
        let selected = options.is_selected(&block.id);
        wrapper = wrapper
            .with_class(if selected { "pb-selected" } else { "pb-hoverable" })
            .on_click(Gesture::Select(block.id.clone()));

        if selected {
            wrapper = wrapper.with_child(
                VNode::element("div")
                    .with_class("pb-badge")
                    .with_child(VNode::text(block.type_name())),
            );
        }
    }

    wrapper.with_children(render_inner(block, options))
}

fn render_inner(block: &Block, options: &RenderOptions) -> Vec<VNode> {
    match &block.kind {
        BlockKind::Section { children } => {
            let mut inner = VNode::element("div")
                .with_class("pb-section-inner")
                .with_children(render_blocks(children, options));

            let has_columns = children
                .iter()
                .any(|child| child.block_type() == Some(BlockType::Column));
            if has_columns && !block.styles.has_display() {
                inner = inner.with_style("display", "flex").with_style("flex-wrap", "wrap");
            }

            if children.is_empty() && options.is_editor() {
                inner = inner.with_child(placeholder("pb-empty", EMPTY_SECTION_HINT));
            }
            vec![inner]
        }

        BlockKind::Column { children } => {
            let mut nodes = render_blocks(children, options);
            if children.is_empty() && options.is_editor() {
                nodes.push(placeholder("pb-empty", EMPTY_COLUMN_HINT));
            }
            nodes
        }

        BlockKind::Hero(HeroContent { title, subtitle }) => vec![VNode::element("div")
            .with_class("pb-hero")
            .with_child(VNode::element("h1").with_child(VNode::text(or_default(title, "Hero Title"))))
            .with_child(
                VNode::element("p").with_child(VNode::text(or_default(subtitle, "Hero Subtitle"))),
            )],

        BlockKind::Text(content) => vec![VNode::element("div")
            .with_class("pb-text")
            .with_child(VNode::raw_html(content.html.as_deref().unwrap_or_default()))],

        BlockKind::Heading(content) => vec![VNode::element("h2")
            .with_class("pb-heading")
            .with_child(VNode::text(or_default(&content.text, "Heading")))],

        BlockKind::Image(content) => vec![render_image(content)],

        BlockKind::Button(content) => vec![render_button(content, options)],

        BlockKind::Divider => vec![VNode::element("hr").with_class("pb-divider")],

        BlockKind::Stats(StatsContent { number, label }) => vec![VNode::element("div")
            .with_class("pb-stats")
            .with_child(
                VNode::element("div")
                    .with_class("pb-stats-number")
                    .with_child(VNode::text(or_default(number, "0"))),
            )
            .with_child(
                VNode::element("div")
                    .with_class("pb-stats-label")
                    .with_child(VNode::text(or_default(label, "Label"))),
            )],

        BlockKind::Unknown { type_name, .. } => {
            warn!(block_id = %block.id, block_type = %type_name, "Unknown block type");
            vec![VNode::error(format!("Unknown block type: {}", type_name))]
        }
    }
}

fn render_image(content: &ImageContent) -> VNode {
    let caption = content.caption.as_deref().filter(|c| !c.is_empty());
    let mut figure = VNode::element("div").with_class("pb-image");

    figure = match content.url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => figure.with_child(
            VNode::element("img")
                .with_attr("src", url)
                .with_attr("alt", caption.unwrap_or("Image")),
        ),
        None => figure.with_child(placeholder("pb-image-placeholder", "Image Placeholder")),
    };

    match caption {
        Some(caption) => figure.with_child(
            VNode::element("span")
                .with_class("pb-caption")
                .with_child(VNode::text(caption)),
        ),
        None => figure,
    }
}

fn render_button(content: &ButtonContent, options: &RenderOptions) -> VNode {
    let button = VNode::element("button")
        .with_class("pb-button")
        .with_child(VNode::text(or_default(&content.text, "Button")));

    if options.is_editor() {
        return button;
    }

    let link = or_default(&content.link, "#");
    button
        .with_attr("data-href", link)
        .on_click(Gesture::Navigate(link.to_string()))
}

fn render_legacy(title: &str, html: &str) -> VNode {
    VNode::element("article")
        .with_class("pb-legacy")
        .with_child(
            VNode::element("header")
                .with_child(VNode::element("h1").with_child(VNode::text(title))),
        )
        .with_child(
            VNode::element("div")
                .with_class("pb-legacy-body")
                .with_child(VNode::comment(LEGACY_MARKER))
                .with_child(VNode::raw_html(html)),
        )
}

fn placeholder(class: &str, hint: &str) -> VNode {
    VNode::element("div")
        .with_class(class)
        .with_child(VNode::text(hint))
}

/// Field value, or `fallback` when missing or empty.
fn or_default<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(fallback)
}
