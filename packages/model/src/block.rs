//! # Block Tree
//!
//! A page is an ordered forest of [`Block`]s. The variant set is closed
//! ([`BlockType`]); only `section` and `column` hold children, and that is
//! encoded in [`BlockKind`] itself: a leaf variant has nowhere to put a
//! child, so container-ness is fixed the moment a block is built.
//!
//! ## Wire shape
//!
//! ```json
//! { "id": "b1", "type": "heading", "content": { "text": "Hi" }, "styles": {} }
//! { "id": "b2", "type": "section", "content": {}, "styles": {}, "children": [] }
//! ```
//!
//! Content payloads are read leniently: a missing or mistyped field becomes
//! `None` and the renderer substitutes a placeholder. Content keys a variant
//! does not model are kept in [`Block::extra_content`] and written back on
//! save. A `type` outside the
//! closed set is kept as [`BlockKind::Unknown`] so it survives a round-trip
//! and renders as a diagnostic instead of failing the whole document.

use crate::lenient::{lenient_string, or_default};
use crate::style::ElementStyle;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Opaque block identifier, unique across a configuration.
pub type BlockId = String;

/// Closed set of block variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Section,
    Column,
    Heading,
    Text,
    Image,
    Button,
    Hero,
    Divider,
    Stats,
}

impl BlockType {
    pub const ALL: [BlockType; 9] = [
        BlockType::Section,
        BlockType::Column,
        BlockType::Heading,
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Hero,
        BlockType::Divider,
        BlockType::Stats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Section => "section",
            BlockType::Column => "column",
            BlockType::Heading => "heading",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Hero => "hero",
            BlockType::Divider => "divider",
            BlockType::Stats => "stats",
        }
    }

    pub fn parse(name: &str) -> Option<BlockType> {
        BlockType::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Container variants may hold children.
    pub fn is_container(&self) -> bool {
        matches!(self, BlockType::Section | BlockType::Column)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingContent {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonContent {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsContent {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Variant tag plus its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Section { children: Vec<Block> },
    Column { children: Vec<Block> },
    Heading(HeadingContent),
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Hero(HeroContent),
    Divider,
    Stats(StatsContent),
    /// A `type` tag outside the closed set, kept verbatim.
    Unknown { type_name: String, content: Value },
}

impl BlockKind {
    /// Empty payload for a variant.
    pub fn empty(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Section => BlockKind::Section { children: Vec::new() },
            BlockType::Column => BlockKind::Column { children: Vec::new() },
            BlockType::Heading => BlockKind::Heading(HeadingContent::default()),
            BlockType::Text => BlockKind::Text(TextContent::default()),
            BlockType::Image => BlockKind::Image(ImageContent::default()),
            BlockType::Button => BlockKind::Button(ButtonContent::default()),
            BlockType::Hero => BlockKind::Hero(HeroContent::default()),
            BlockType::Divider => BlockKind::Divider,
            BlockType::Stats => BlockKind::Stats(StatsContent::default()),
        }
    }

    /// Decode a variant from its wire tag and raw content, returning the
    /// content keys the variant leaves unmodelled.
    fn decode(
        type_name: String,
        content: Value,
        children: Option<Vec<Block>>,
    ) -> (Self, Map<String, Value>) {
        let Some(block_type) = BlockType::parse(&type_name) else {
            return (BlockKind::Unknown { type_name, content }, Map::new());
        };

        if !block_type.is_container() && children.as_ref().is_some_and(|c| !c.is_empty()) {
            warn!(block_type = %block_type, "Dropping children of a leaf block");
        }

        let kind = match block_type {
            BlockType::Section => BlockKind::Section {
                children: children.unwrap_or_default(),
            },
            BlockType::Column => BlockKind::Column {
                children: children.unwrap_or_default(),
            },
            BlockType::Heading => BlockKind::Heading(decode_content(&content)),
            BlockType::Text => BlockKind::Text(decode_content(&content)),
            BlockType::Image => BlockKind::Image(decode_content(&content)),
            BlockType::Button => BlockKind::Button(decode_content(&content)),
            BlockType::Hero => BlockKind::Hero(decode_content(&content)),
            BlockType::Divider => BlockKind::Divider,
            BlockType::Stats => BlockKind::Stats(decode_content(&content)),
        };

        let modelled = kind.modelled_content();
        let extra = match content {
            Value::Object(fields) => fields
                .into_iter()
                .filter(|(key, _)| !modelled.contains_key(key))
                .collect(),
            _ => Map::new(),
        };

        (kind, extra)
    }

    /// Fields the typed payload holds a value for.
    fn modelled_content(&self) -> Map<String, Value> {
        let encoded = match self {
            BlockKind::Section { .. }
            | BlockKind::Column { .. }
            | BlockKind::Divider
            | BlockKind::Unknown { .. } => return Map::new(),
            BlockKind::Heading(c) => serde_json::to_value(c),
            BlockKind::Text(c) => serde_json::to_value(c),
            BlockKind::Image(c) => serde_json::to_value(c),
            BlockKind::Button(c) => serde_json::to_value(c),
            BlockKind::Hero(c) => serde_json::to_value(c),
            BlockKind::Stats(c) => serde_json::to_value(c),
        };
        match encoded {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        }
    }
}

/// A node in the content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub styles: ElementStyle,
    /// Content keys the variant does not model.
    pub extra_content: Map<String, Value>,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            styles: ElementStyle::default(),
            extra_content: Map::new(),
        }
    }

    pub fn with_styles(mut self, styles: ElementStyle) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_children(mut self, new_children: Vec<Block>) -> Self {
        if let Some(children) = self.children_mut() {
            children.extend(new_children);
        }
        self
    }

    /// Variant of this block, `None` for an unrecognized tag.
    pub fn block_type(&self) -> Option<BlockType> {
        match &self.kind {
            BlockKind::Section { .. } => Some(BlockType::Section),
            BlockKind::Column { .. } => Some(BlockType::Column),
            BlockKind::Heading(_) => Some(BlockType::Heading),
            BlockKind::Text(_) => Some(BlockType::Text),
            BlockKind::Image(_) => Some(BlockType::Image),
            BlockKind::Button(_) => Some(BlockType::Button),
            BlockKind::Hero(_) => Some(BlockType::Hero),
            BlockKind::Divider => Some(BlockType::Divider),
            BlockKind::Stats(_) => Some(BlockType::Stats),
            BlockKind::Unknown { .. } => None,
        }
    }

    /// Wire tag, including unrecognized ones.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            BlockKind::Unknown { type_name, .. } => type_name,
            _ => self.block_type().map(|t| t.as_str()).unwrap_or_default(),
        }
    }

    pub fn is_container(&self) -> bool {
        self.block_type().is_some_and(|t| t.is_container())
    }

    pub fn children(&self) -> Option<&[Block]> {
        match &self.kind {
            BlockKind::Section { children } | BlockKind::Column { children } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match &mut self.kind {
            BlockKind::Section { children } | BlockKind::Column { children } => Some(children),
            _ => None,
        }
    }

    /// Content payload as a JSON value: the typed fields over any
    /// unmodelled ones.
    pub fn content_value(&self) -> Value {
        if let BlockKind::Unknown { content, .. } = &self.kind {
            return content.clone();
        }

        let mut fields = self.extra_content.clone();
        fields.extend(self.kind.modelled_content());
        Value::Object(fields)
    }

    /// Shallow-merge `patch` into this block's content.
    ///
    /// Keys the variant does not model land in `extra_content`. Containers
    /// and dividers take no content edits, so the merge is a no-op for them.
    /// Returns whether anything could be merged.
    pub fn merge_content(&mut self, patch: &Map<String, Value>) -> bool {
        match self.block_type() {
            Some(BlockType::Section | BlockType::Column | BlockType::Divider) => false,
            Some(_) => {
                let mut fields = match self.content_value() {
                    Value::Object(fields) => fields,
                    _ => Map::new(),
                };
                for (key, value) in patch {
                    fields.insert(key.clone(), value.clone());
                }

                let (kind, extra) =
                    BlockKind::decode(self.type_name().to_string(), Value::Object(fields), None);
                self.kind = kind;
                self.extra_content = extra;
                true
            }
            None => {
                if let BlockKind::Unknown { content, .. } = &mut self.kind {
                    match content {
                        Value::Object(map) => {
                            for (key, value) in patch {
                                map.insert(key.clone(), value.clone());
                            }
                        }
                        other => *other = Value::Object(patch.clone()),
                    }
                }
                true
            }
        }
    }
}

/// Serialized form of [`Block`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    content: Value,
    #[serde(default, deserialize_with = "or_default")]
    styles: ElementStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Block>>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let (kind, extra_content) = BlockKind::decode(raw.block_type, raw.content, raw.children);
        Block {
            id: raw.id,
            kind,
            styles: raw.styles,
            extra_content,
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let block_type = block.type_name().to_string();
        let content = block.content_value();
        let children = match block.kind {
            BlockKind::Section { children } | BlockKind::Column { children } => Some(children),
            _ => None,
        };

        RawBlock {
            id: block.id,
            block_type,
            content,
            styles: block.styles,
            children,
        }
    }
}

fn decode_content<T: DeserializeOwned + Default>(content: &Value) -> T {
    T::deserialize(content).unwrap_or_default()
}
