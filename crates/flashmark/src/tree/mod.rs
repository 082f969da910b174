//! Generic document tree shared by both dialects
//!
//! The flat dialect is parsed into this tree, normalized in place and
//! converted to the structured model; the structured model is converted
//! back into this tree, normalized and serialized. Each element owns its
//! children exclusively.

mod parse;
mod phrasing;
mod serialize;

pub use parse::parse_html;
pub use phrasing::is_phrasing_tag;
pub use serialize::to_html;

/// Tag of the synthetic element wrapping a parsed fragment
pub const ROOT_TAG: &str = "root";

/// Tree node: text or tagged element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// Creates a text node
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Creates an element node without attributes
    pub fn element(tag: &str, children: Vec<Node>) -> Self {
        Node::Element(Element::with_children(tag, children))
    }

    /// Tag name, `None` for text
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(element.tag.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// True for element nodes with the given tag
    pub fn is_element(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    /// Text is phrasing; elements are classified by tag
    pub fn is_phrasing(&self) -> bool {
        match self {
            Node::Text(_) => true,
            Node::Element(element) => is_phrasing_tag(&element.tag),
        }
    }
}

/// Tagged element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Attributes::default(),
            children: Vec::new(),
        }
    }

    pub fn with_children(tag: &str, children: Vec<Node>) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Attributes::default(),
            children,
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn is_list(&self) -> bool {
        matches!(self.tag.as_str(), "ul" | "ol")
    }

    pub fn is_heading(&self) -> bool {
        heading_depth(&self.tag).is_some()
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Number of nodes in this subtree, the element included
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                Node::Element(element) => element.node_count(),
                Node::Text(_) => 1,
            })
            .sum::<usize>()
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(value) => out.push_str(value),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Heading level for `h1`..`h6`
pub fn heading_depth(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Insertion-ordered attribute map
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    /// Replaces an existing value in place or appends
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.remove(index).1)
    }

    /// True when the whitespace-separated `class` list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::default();
        for (key, value) in iter {
            attributes.set(&key.into(), value);
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_keep_insertion_order() {
        let mut attrs = Attributes::default();
        attrs.set("id", "a");
        attrs.set("src", "b");
        attrs.set("id", "c");

        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "src"]);
        assert_eq!(attrs.get("id"), Some("c"));
    }

    #[test]
    fn test_has_class_matches_whole_tokens() {
        let attrs: Attributes = [("class", "inline-media big")].into_iter().collect();
        assert!(attrs.has_class("inline-media"));
        assert!(attrs.has_class("big"));
        assert!(!attrs.has_class("inline"));
    }

    #[test]
    fn test_text_content_and_count() {
        let element = Element::with_children(
            "p",
            vec![
                Node::text("a "),
                Node::element("b", vec![Node::text("bold")]),
            ],
        );
        assert_eq!(element.text_content(), "a bold");
        assert_eq!(element.node_count(), 4);
    }

    #[test]
    fn test_phrasing_classification() {
        assert!(Node::text("x").is_phrasing());
        assert!(Node::element("em", vec![]).is_phrasing());
        assert!(!Node::element("li", vec![]).is_phrasing());
    }
}
