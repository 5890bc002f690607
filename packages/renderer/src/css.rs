//! # Style Resolution
//!
//! Maps a block's abstract [`ElementStyle`] to concrete CSS declarations.
//!
//! - Pixel attributes are stored unitless and resolve with a `px` suffix.
//! - `borderRadius` goes through the radius scale lookup; other literals
//!   pass through.
//! - `backgroundImage` brings `cover` sizing and `center` positioning along.
//! - Everything else is copied verbatim.
//!
//! An absent (or empty) attribute produces no declaration at all, so the
//! element inherits instead of getting a zero.

use pagesmith_model::ElementStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Concrete CSS properties, kebab-case names in stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    pub properties: BTreeMap<String, String>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.properties.insert(property.to_string(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Inline `style` attribute text: `a: 1; b: 2`.
    pub fn to_inline(&self) -> String {
        self.properties
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl IntoIterator for StyleDeclaration {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

/// Value of a `borderRadius` attribute.
pub fn radius_value(radius: &str) -> &str {
    match radius {
        "none" => "0",
        "sm" => "0.125rem",
        "md" => "0.375rem",
        "lg" => "0.5rem",
        other => other,
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Resolve abstract style attributes into CSS declarations.
pub fn resolve_styles(styles: &ElementStyle) -> StyleDeclaration {
    let mut css = StyleDeclaration::new();

    let pixels = [
        ("padding-top", &styles.padding_top),
        ("padding-bottom", &styles.padding_bottom),
        ("padding-left", &styles.padding_left),
        ("padding-right", &styles.padding_right),
        ("margin-top", &styles.margin_top),
        ("margin-bottom", &styles.margin_bottom),
        ("border-width", &styles.border_width),
        ("font-size", &styles.font_size),
        ("min-height", &styles.min_height),
    ];
    for (property, value) in pixels {
        if let Some(value) = present(value) {
            css.set(property, format!("{}px", value));
        }
    }

    let verbatim = [
        ("background-color", &styles.background_color),
        ("color", &styles.color),
        ("border-color", &styles.border_color),
        ("box-shadow", &styles.box_shadow),
        ("font-weight", &styles.font_weight),
        ("text-align", &styles.text_align),
        ("width", &styles.width),
        ("display", &styles.display),
        ("justify-content", &styles.justify_content),
        ("align-items", &styles.align_items),
    ];
    for (property, value) in verbatim {
        if let Some(value) = present(value) {
            css.set(property, value);
        }
    }

    if let Some(radius) = present(&styles.border_radius) {
        css.set("border-radius", radius_value(radius));
    }

    if let Some(image) = present(&styles.background_image) {
        css.set("background-image", format!("url({})", image));
        css.set("background-size", "cover");
        css.set("background-position", "center");
    }

    css
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(build: impl FnOnce(&mut ElementStyle)) -> ElementStyle {
        let mut styles = ElementStyle::default();
        build(&mut styles);
        styles
    }

    #[test]
    fn test_pixel_attributes_get_unit() {
        let css = resolve_styles(&style(|s| {
            s.padding_top = Some("40".to_string());
            s.font_size = Some("18".to_string());
            s.min_height = Some("300".to_string());
        }));

        assert_eq!(css.get("padding-top"), Some("40px"));
        assert_eq!(css.get("font-size"), Some("18px"));
        assert_eq!(css.get("min-height"), Some("300px"));
        assert_eq!(css.len(), 3);
    }

    #[test]
    fn test_absent_resolves_to_unset() {
        let css = resolve_styles(&style(|s| {
            s.padding_left = Some(String::new());
        }));
        assert!(css.is_empty());
        assert_eq!(css.to_inline(), "");
    }

    #[test]
    fn test_radius_lookup_and_passthrough() {
        for (input, expected) in [
            ("none", "0"),
            ("sm", "0.125rem"),
            ("md", "0.375rem"),
            ("lg", "0.5rem"),
            ("12px", "12px"),
        ] {
            let css = resolve_styles(&style(|s| s.border_radius = Some(input.to_string())));
            assert_eq!(css.get("border-radius"), Some(expected), "radius {}", input);
        }
    }

    #[test]
    fn test_background_image_bundle() {
        let css = resolve_styles(&style(|s| {
            s.background_image = Some("https://img/bg.png".to_string());
        }));

        assert_eq!(css.get("background-image"), Some("url(https://img/bg.png)"));
        assert_eq!(css.get("background-size"), Some("cover"));
        assert_eq!(css.get("background-position"), Some("center"));

        let plain = resolve_styles(&style(|s| s.background_color = Some("#fff".to_string())));
        assert!(!plain.contains("background-size"));
        assert!(!plain.contains("background-position"));
    }

    #[test]
    fn test_verbatim_and_inline_order() {
        let css = resolve_styles(&style(|s| {
            s.text_align = Some("center".to_string());
            s.color = Some("#112233".to_string());
        }));
        assert_eq!(css.to_inline(), "color: #112233; text-align: center");
    }
}
