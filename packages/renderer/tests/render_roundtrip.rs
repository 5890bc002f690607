use pagesmith_model::{from_json, to_json, WebsiteConfig};
use pagesmith_renderer::{dispatch, render_page, Gesture, GestureSink, RenderOptions, VNode};

const SITE: &str = r##"{
  "companyName": "Northwind Clinic",
  "companyTagline": "Care close to home",
  "theme": {
    "font": "Inter",
    "colors": { "primary": "#0284c7", "secondary": "#0f172a", "accent": "#14b8a6" },
    "borderRadius": "md"
  },
  "pages": [
    {
      "id": "home",
      "slug": "home",
      "title": "Home",
      "type": "custom",
      "status": "published",
      "blocks": [
        {
          "id": "s1",
          "type": "section",
          "content": {},
          "styles": { "paddingTop": "40", "backgroundImage": "https://img/hero.jpg" },
          "children": [
            {
              "id": "c1",
              "type": "column",
              "content": {},
              "styles": { "width": "50%" },
              "children": [
                { "id": "h1", "type": "hero", "content": { "title": "Welcome" }, "styles": {} },
                { "id": "t1", "type": "text", "content": { "html": "<p>Open daily</p>" }, "styles": {} }
              ]
            },
            {
              "id": "c2",
              "type": "column",
              "content": {},
              "styles": { "width": "50%" },
              "children": [
                { "id": "st1", "type": "stats", "content": { "number": 24, "label": "Labs" }, "styles": {} },
                { "id": "b1", "type": "button", "content": { "text": "Book", "link": "booking" }, "styles": { "borderRadius": "lg" } }
              ]
            }
          ]
        },
        { "id": "d1", "type": "divider", "content": {}, "styles": {} },
        { "id": "x1", "type": "marquee", "content": { "speed": 3 }, "styles": {} }
      ]
    }
  ],
  "mediaLibrary": [],
  "menus": { "header": [], "footer": [] },
  "contact": { "email": "", "phone": "", "address": "", "hours": "" },
  "hero": { "titlePrefix": "", "titleHighlight": "", "description": "", "imageUrl": "" },
  "features": []
}"##;

fn load() -> WebsiteConfig {
    from_json(SITE).expect("fixture parses")
}

#[test]
fn test_static_render_survives_serialization_round_trip() {
    let original = load();
    let reloaded = from_json(&to_json(&original).unwrap()).unwrap();

    let before = render_page(&original.pages[0], &RenderOptions::static_site());
    let after = render_page(&reloaded.pages[0], &RenderOptions::static_site());

    assert_eq!(before, after);
}

#[test]
fn test_static_render_structure() {
    let config = load();
    let page = render_page(&config.pages[0], &RenderOptions::static_site());

    let section = page.find_by_key("s1").unwrap();
    assert_eq!(section.style("padding-top"), Some("40px"));
    assert_eq!(section.style("background-size"), Some("cover"));
    assert_eq!(section.children()[0].style("flex-wrap"), Some("wrap"));

    let hero = page.find_by_key("h1").unwrap();
    assert_eq!(hero.text_content(), "WelcomeHero Subtitle");

    let stats = page.find_by_key("st1").unwrap();
    assert_eq!(stats.text_content(), "24Labs");

    let button = page.find_by_key("b1").unwrap();
    assert_eq!(button.style("border-radius"), Some("0.5rem"));

    let unknown = page.find_by_key("x1").unwrap();
    assert_eq!(unknown.children(), &[VNode::error("Unknown block type: marquee")]);
}

#[test]
fn test_static_button_routes_raw_link_to_navigator() {
    let config = load();
    let page = render_page(&config.pages[0], &RenderOptions::static_site());

    let mut path = page.path_to("b1").unwrap();
    path.push(0);
    let gesture = page.click(&path).cloned().unwrap();

    let mut visited = Vec::new();
    let mut navigator = |target: &str| visited.push(target.to_string());
    dispatch(&gesture, &mut pagesmith_renderer::NoSelection, &mut navigator);

    assert_eq!(visited, vec!["booking"]);
}

#[derive(Default)]
struct Selection(Option<String>);

impl GestureSink for Selection {
    fn select(&mut self, block_id: &str) {
        self.0 = Some(block_id.to_string());
    }

    fn clear_selection(&mut self) {
        self.0 = None;
    }
}

#[test]
fn test_editor_clicks_select_without_navigating() {
    let config = load();
    let canvas = render_page(&config.pages[0], &RenderOptions::editor(None));
    let mut selection = Selection::default();
    let mut visited: Vec<String> = Vec::new();

    let mut path = canvas.path_to("b1").unwrap();
    path.push(0);
    let gesture = canvas.click(&path).cloned().unwrap();
    dispatch(&gesture, &mut selection, &mut |t: &str| visited.push(t.to_string()));

    assert_eq!(selection.0.as_deref(), Some("b1"));
    assert!(visited.is_empty());

    let outside = canvas.click(&[0]).cloned().unwrap();
    assert_eq!(outside, Gesture::ClearSelection);
    dispatch(&outside, &mut selection, &mut pagesmith_renderer::NoNavigation);
    assert_eq!(selection.0, None);
}
