//! JSON persistence for [`WebsiteConfig`].
//!
//! The site is stored as a single camelCase JSON document. There is no
//! schema version; unknown block variants are preserved as-is.

use crate::error::{ModelError, ModelResult};
use crate::site::WebsiteConfig;
use crate::visitor::duplicate_ids;
use std::path::Path;
use tracing::debug;

/// Parse a configuration, rejecting block id collisions.
pub fn from_json(source: &str) -> ModelResult<WebsiteConfig> {
    let config: WebsiteConfig = serde_json::from_str(source)?;

    let dupes = duplicate_ids(&config);
    if !dupes.is_empty() {
        return Err(ModelError::DuplicateIds(dupes));
    }

    Ok(config)
}

pub fn to_json(config: &WebsiteConfig) -> ModelResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

pub fn load_config(path: &Path) -> ModelResult<WebsiteConfig> {
    let source = std::fs::read_to_string(path)?;
    let config = from_json(&source)?;
    debug!(path = %path.display(), pages = config.pages.len(), "Loaded site");
    Ok(config)
}

pub fn save_config(path: &Path, config: &WebsiteConfig) -> ModelResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_json(config)?)?;
    debug!(path = %path.display(), "Saved site");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{
            "companyName": "Dupes",
            "pages": [{
                "id": "p", "slug": "p", "title": "P", "type": "custom", "status": "draft",
                "blocks": [
                    { "id": "same", "type": "divider" },
                    { "id": "s", "type": "section", "children": [ { "id": "same", "type": "divider" } ] }
                ]
            }]
        }"#;

        match from_json(json) {
            Err(ModelError::DuplicateIds(ids)) => assert_eq!(ids, vec!["same"]),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_loads_numeric_and_null_style_values() {
        let json = r##"{
            "companyName": "Numbers",
            "pages": [{
                "id": "p", "slug": "p", "title": "P", "type": "custom", "status": "draft",
                "blocks": [
                    { "id": "s", "type": "section", "styles": { "paddingTop": 40, "paddingLeft": null, "color": "#111" } }
                ]
            }]
        }"##;

        let config = from_json(json).unwrap();
        let styles = &config.pages[0].blocks[0].styles;
        assert_eq!(styles.padding_top.as_deref(), Some("40"));
        assert_eq!(styles.padding_left, None);
        assert_eq!(styles.color.as_deref(), Some("#111"));

        let reloaded = from_json(&to_json(&config).unwrap()).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("site.json");

        let config = WebsiteConfig::new("Acme");
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
