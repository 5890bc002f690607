//! # Website Configuration
//!
//! [`WebsiteConfig`] is the aggregate root: identity, theme, pages, media,
//! menus and marketing copy. The builder edits a draft copy and publishing
//! swaps the whole value in one assignment.

use crate::block::Block;
use serde::{Deserialize, Serialize};

pub type PageId = String;

/// Who owns a page's rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// Rendered by the host application (catalog, booking, ...).
    System,
    /// Fully driven by its block tree.
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub slug: String,
    pub title: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub status: PageStatus,
    /// Root-level blocks, in render order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
    /// Raw HTML shown only while `blocks` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_content: Option<String>,
}

impl Page {
    /// True when the page has neither blocks nor legacy content.
    pub fn is_blank(&self) -> bool {
        self.blocks.is_empty() && self.legacy_content.as_deref().map_or(true, str::is_empty)
    }
}

/// Theme-wide corner rounding scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusScale {
    None,
    Sm,
    #[default]
    Md,
    Lg,
}

impl RadiusScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            RadiusScale::None => "none",
            RadiusScale::Sm => "sm",
            RadiusScale::Md => "md",
            RadiusScale::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub font: String,
    pub colors: ThemeColors,
    #[serde(default)]
    pub border_radius: RadiusScale,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font: "Inter".to_string(),
            colors: ThemeColors {
                primary: "#0284c7".to_string(),
                secondary: "#0f172a".to_string(),
                accent: "#14b8a6".to_string(),
            },
            border_radius: RadiusScale::Md,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    /// Page slug or external URL; interpreted by the navigation collaborator.
    pub link: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            link: link.into(),
            children: Vec::new(),
        }
    }
}

/// Which of the two named menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Header,
    Footer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menus {
    #[serde(default)]
    pub header: Vec<MenuItem>,
    #[serde(default)]
    pub footer: Vec<MenuItem>,
}

impl Menus {
    pub fn get(&self, kind: MenuKind) -> &[MenuItem] {
        match kind {
            MenuKind::Header => &self.header,
            MenuKind::Footer => &self.footer,
        }
    }

    pub fn get_mut(&mut self, kind: MenuKind) -> &mut Vec<MenuItem> {
        match kind {
            MenuKind::Header => &mut self.header,
            MenuKind::Footer => &mut self.footer,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub hours: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroCopy {
    pub title_prefix: String,
    pub title_highlight: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

/// Aggregate root of a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteConfig {
    pub company_name: String,
    #[serde(default)]
    pub company_tagline: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub media_library: Vec<MediaItem>,
    #[serde(default)]
    pub menus: Menus,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub hero: HeroCopy,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl WebsiteConfig {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            company_tagline: String::new(),
            theme: Theme::default(),
            pages: Vec::new(),
            media_library: Vec::new(),
            menus: Menus::default(),
            contact: ContactInfo::default(),
            hero: HeroCopy::default(),
            features: Vec::new(),
        }
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_system_page_without_blocks() {
        let json = r#"{
            "companyName": "VitalLab",
            "pages": [
                { "id": "home", "slug": "home", "title": "Home", "type": "system", "status": "published" }
            ]
        }"#;

        let config: WebsiteConfig = serde_json::from_str(json).unwrap();
        let page = config.page("home").unwrap();
        assert_eq!(page.page_type, PageType::System);
        assert!(page.blocks.is_empty());
        assert!(page.is_blank());
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn test_menus_by_kind() {
        let mut menus = Menus::default();
        menus
            .get_mut(MenuKind::Footer)
            .push(MenuItem::new("f1", "Privacy Policy", "privacy"));

        assert!(menus.get(MenuKind::Header).is_empty());
        assert_eq!(menus.get(MenuKind::Footer)[0].link, "privacy");
    }

    #[test]
    fn test_radius_scale_wire_names() {
        let json = serde_json::to_string(&RadiusScale::Lg).unwrap();
        assert_eq!(json, "\"lg\"");
        assert_eq!(RadiusScale::Sm.as_str(), "sm");
    }
}
