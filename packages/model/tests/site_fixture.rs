//! Loading a realistic site document

use pagesmith_model::{from_json, to_json, BlockKind, BlockType, PageType, RadiusScale};

const SITE: &str = r##"{
  "companyName": "VitalLab",
  "companyTagline": "Medical Diagnostics",
  "theme": {
    "font": "Inter",
    "colors": { "primary": "#0284c7", "secondary": "#0f172a", "accent": "#14b8a6" },
    "borderRadius": "md"
  },
  "mediaLibrary": [
    { "id": "m1", "name": "Lab Scientist", "type": "image", "url": "https://example.com/lab.jpg" }
  ],
  "menus": {
    "header": [
      { "id": "nav1", "label": "Home", "link": "home" },
      { "id": "nav3", "label": "About Us", "link": "about" }
    ],
    "footer": [ { "id": "f1", "label": "Privacy Policy", "link": "privacy" } ]
  },
  "pages": [
    { "id": "home", "slug": "home", "title": "Home", "type": "system", "status": "published" },
    {
      "id": "about", "slug": "about", "title": "About Us", "type": "custom", "status": "published",
      "blocks": [
        {
          "id": "b1", "type": "hero",
          "content": { "title": "Dedicated to Precision", "subtitle": "About VitalLab" },
          "styles": { "color": "#ffffff", "minHeight": "400", "display": "flex" }
        },
        {
          "id": "b3", "type": "section", "content": {},
          "styles": { "backgroundColor": "#f1f5f9", "paddingTop": "40", "paddingBottom": "40" },
          "children": [
            { "id": "b3-1", "type": "text", "content": { "html": "<h3>Accredited</h3>" }, "styles": { "paddingLeft": "20" } }
          ]
        },
        {
          "id": "b4", "type": "button",
          "content": { "text": "View Our Services", "link": "catalog" },
          "styles": { "textAlign": "center" }
        }
      ]
    }
  ],
  "contact": { "email": "support@vitallab.com", "phone": "(555) 123-4567", "address": "123 Wellness Ave", "hours": "Mon-Fri" },
  "hero": { "titlePrefix": "Advanced diagnostics for", "titleHighlight": "a healthier tomorrow", "description": "Fast results.", "imageUrl": "https://example.com/hero.jpg" },
  "features": [ { "title": "Accurate Results", "description": "ISO 15189 certified." } ]
}"##;

#[test]
fn test_load_site_document() {
    let config = from_json(SITE).unwrap();

    assert_eq!(config.company_name, "VitalLab");
    assert_eq!(config.theme.border_radius, RadiusScale::Md);
    assert_eq!(config.menus.header.len(), 2);

    let about = config.page_by_slug("about").unwrap();
    assert_eq!(about.page_type, PageType::Custom);
    assert_eq!(about.blocks.len(), 3);
    assert_eq!(about.blocks[1].block_type(), Some(BlockType::Section));
    assert_eq!(about.blocks[1].children().unwrap()[0].id, "b3-1");

    match &about.blocks[2].kind {
        BlockKind::Button(button) => assert_eq!(button.link.as_deref(), Some("catalog")),
        other => panic!("expected button, got {:?}", other),
    }
}

#[test]
fn test_site_survives_json_round_trip() {
    let config = from_json(SITE).unwrap();
    let json = to_json(&config).unwrap();
    let reloaded = from_json(&json).unwrap();

    assert_eq!(reloaded, config);
}
