use crate::lenient::lenient_string;
use serde::{Deserialize, Serialize};

/// Abstract style attributes of a block.
///
/// Every attribute is optional and independently settable. Pixel-valued
/// attributes hold unitless numeric strings (`"40"`); the renderer appends
/// the unit. An empty string is treated the same as an absent attribute.
/// Numbers and booleans read as their string form, any other JSON shape
/// as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementStyle {
    // Spacing
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,

    // Appearance
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,

    // Typography
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,

    // Layout
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = Some(value.clone());
            }
        )+
    };
}

impl ElementStyle {
    /// Shallow merge: every attribute set in `patch` overwrites ours,
    /// attributes the patch leaves unset are kept.
    pub fn merge(&mut self, patch: &ElementStyle) {
        merge_fields!(self, patch;
            padding_top,
            padding_bottom,
            padding_left,
            padding_right,
            margin_top,
            margin_bottom,
            background_color,
            background_image,
            color,
            border_radius,
            border_width,
            border_color,
            box_shadow,
            font_size,
            font_weight,
            text_align,
            width,
            min_height,
            display,
            justify_content,
            align_items,
        );
    }

    /// Merge into a copy, leaving `self` untouched.
    pub fn merged(&self, patch: &ElementStyle) -> ElementStyle {
        let mut next = self.clone();
        next.merge(patch);
        next
    }

    pub fn is_empty(&self) -> bool {
        *self == ElementStyle::default()
    }

    /// True when `display` carries a non-empty value.
    pub fn has_display(&self) -> bool {
        self.display.as_deref().is_some_and(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_only_named_fields() {
        let mut style = ElementStyle {
            padding_top: Some("40".to_string()),
            color: Some("#000000".to_string()),
            ..Default::default()
        };

        style.merge(&ElementStyle {
            color: Some("#ffffff".to_string()),
            ..Default::default()
        });

        assert_eq!(style.padding_top.as_deref(), Some("40"));
        assert_eq!(style.color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn test_camel_case_serialization() {
        let style = ElementStyle {
            background_color: Some("#112233".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r##"{"backgroundColor":"#112233"}"##);
    }

    #[test]
    fn test_lenient_attribute_values() {
        let style: ElementStyle = serde_json::from_str(
            r##"{ "paddingTop": 40, "paddingLeft": null, "color": "#fff", "width": ["100%"] }"##,
        )
        .unwrap();

        assert_eq!(style.padding_top.as_deref(), Some("40"));
        assert_eq!(style.padding_left, None);
        assert_eq!(style.color.as_deref(), Some("#fff"));
        assert_eq!(style.width, None);
    }

    #[test]
    fn test_has_display_ignores_empty_string() {
        let style = ElementStyle {
            display: Some(String::new()),
            ..Default::default()
        };
        assert!(!style.has_display());
    }
}
