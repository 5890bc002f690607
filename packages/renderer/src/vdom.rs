use crate::gesture::Gesture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        /// Reconciliation key (the block id for block wrappers)
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// Gesture fired when this element is the deepest bound click target
        #[serde(skip_serializing_if = "Option::is_none")]
        on_click: Option<Gesture>,
    },

    /// Text node (escaped on output)
    Text { content: String },

    /// Trusted markup inserted verbatim
    RawHtml { content: String },

    /// Comment node
    Comment { content: String },

    /// Error node (shows a diagnostic inline instead of failing the page)
    Error { message: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            key: None,
            on_click: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn raw_html(content: impl Into<String>) -> Self {
        VNode::RawHtml {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        VNode::Error {
            message: message.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Append to the space-separated `class` attribute.
    pub fn with_class(mut self, class: &str) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            let classes = attributes.entry("class".to_string()).or_default();
            if !classes.is_empty() {
                classes.push(' ');
            }
            classes.push_str(class);
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_styles(mut self, new_styles: impl IntoIterator<Item = (String, String)>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.extend(new_styles);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        if let VNode::Element {
            key: ref mut node_key,
            ..
        } = self
        {
            *node_key = Some(key.into());
        }
        self
    }

    pub fn on_click(mut self, gesture: Gesture) -> Self {
        if let VNode::Element {
            on_click: ref mut binding,
            ..
        } = self
        {
            *binding = Some(gesture);
        }
        self
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            VNode::Element { key, .. } => key.as_deref(),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            VNode::Element { on_click, .. } => on_click.as_ref(),
            _ => None,
        }
    }

    /// Depth-first search for the element keyed `key`.
    pub fn find_by_key(&self, key: &str) -> Option<&VNode> {
        if self.key() == Some(key) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find_by_key(key))
    }

    /// Concatenated text of this subtree (raw HTML included verbatim).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            VNode::Text { content } | VNode::RawHtml { content } => out.push_str(content),
            VNode::Error { message } => out.push_str(message),
            VNode::Comment { .. } => {}
        }
    }
}

/// A rendered page: one root node per top-level element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualPage {
    pub page_id: String,
    pub title: String,
    pub nodes: Vec<VNode>,
}

impl VirtualPage {
    /// Resolve a click at `path` (child indexes from the roots down).
    ///
    /// Returns the gesture bound to the deepest element along the path, so
    /// a click on a nested block never also selects its ancestors. Indexes
    /// past the end stop the walk at the last valid node.
    pub fn click(&self, path: &[usize]) -> Option<&Gesture> {
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get(*first)?;
        let mut hit = node.gesture();

        for index in rest {
            match node.children().get(*index) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(gesture) = node.gesture() {
                hit = Some(gesture);
            }
        }

        hit
    }

    /// Child-index path to the element keyed `key`, if rendered.
    pub fn path_to(&self, key: &str) -> Option<Vec<usize>> {
        fn search(nodes: &[VNode], key: &str, path: &mut Vec<usize>) -> bool {
            for (index, node) in nodes.iter().enumerate() {
                path.push(index);
                if node.key() == Some(key) || search(node.children(), key, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        search(&self.nodes, key, &mut path).then_some(path)
    }

    pub fn find_by_key(&self, key: &str) -> Option<&VNode> {
        self.nodes.iter().find_map(|node| node.find_by_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_class_appends() {
        let node = VNode::element("div").with_class("a").with_class("b");
        assert_eq!(node.attr("class"), Some("a b"));
        assert!(node.has_class("b"));
        assert!(!node.has_class("c"));
    }

    #[test]
    fn test_click_resolves_deepest_binding() {
        let page = VirtualPage {
            page_id: "p".to_string(),
            title: "P".to_string(),
            nodes: vec![VNode::element("div")
                .on_click(Gesture::ClearSelection)
                .with_child(
                    VNode::element("div")
                        .with_key("outer")
                        .on_click(Gesture::Select("outer".to_string()))
                        .with_child(VNode::element("span").with_child(VNode::text("unbound"))),
                )],
        };

        assert_eq!(page.click(&[0]), Some(&Gesture::ClearSelection));
        assert_eq!(page.click(&[0, 0]), Some(&Gesture::Select("outer".to_string())));
        // unbound descendant bubbles to the nearest bound ancestor
        assert_eq!(page.click(&[0, 0, 0, 0]), Some(&Gesture::Select("outer".to_string())));
        assert_eq!(page.click(&[1]), None);
        assert_eq!(page.path_to("outer"), Some(vec![0, 0]));
    }
}
