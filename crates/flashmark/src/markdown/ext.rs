//! Extension nodes of the structured model
//!
//! mdast has no node types for definition lists, paired-delimiter marks or
//! text directives, so they are carried as named MDX JSX elements:
//! flow elements `dl`/`dt`/`dd`, text elements `u`/`sup`/`sub` and text
//! elements named after the directive (`audio`/`video`).

use markdown::mdast::{
    AttributeContent, AttributeValue, MdxJsxAttribute, MdxJsxFlowElement, MdxJsxTextElement,
    Node, Text,
};

/// Paired-delimiter inline marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Underline,
    Superscript,
    Subscript,
}

impl Mark {
    pub const ALL: [Mark; 3] = [Mark::Underline, Mark::Superscript, Mark::Subscript];

    pub fn delimiter(self) -> char {
        match self {
            Mark::Underline => '=',
            Mark::Superscript => '^',
            Mark::Subscript => '~',
        }
    }

    /// Flat-dialect tag
    pub fn tag(self) -> &'static str {
        match self {
            Mark::Underline => "u",
            Mark::Superscript => "sup",
            Mark::Subscript => "sub",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Mark> {
        Mark::ALL.into_iter().find(|mark| mark.tag() == tag)
    }
}

/// Directive names rendered as inline media
pub const MEDIA_DIRECTIVES: &[&str] = &["audio", "video"];

/// Inline directive `:name[label]{attributes}`
///
/// Attributes keep source order; an empty value is a bare attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub label: String,
    pub attributes: Vec<(String, String)>,
}

impl Directive {
    pub fn into_node(self) -> Node {
        let attributes = self
            .attributes
            .into_iter()
            .map(|(name, value)| {
                AttributeContent::Property(MdxJsxAttribute {
                    name,
                    value: (!value.is_empty()).then_some(AttributeValue::Literal(value)),
                })
            })
            .collect();
        Node::MdxJsxTextElement(MdxJsxTextElement {
            children: vec![Node::Text(Text {
                value: self.label,
                position: None,
            })],
            position: None,
            name: Some(self.name),
            attributes,
        })
    }

    /// Reads a directive back from its text element
    pub fn from_element(element: &MdxJsxTextElement) -> Option<Directive> {
        let name = element.name.as_deref()?;
        if !MEDIA_DIRECTIVES.contains(&name) {
            return None;
        }
        let label = element
            .children
            .iter()
            .map(|child| match child {
                Node::Text(text) => text.value.as_str(),
                _ => "",
            })
            .collect();
        let attributes = element
            .attributes
            .iter()
            .filter_map(|attribute| match attribute {
                AttributeContent::Property(property) => {
                    let value = match &property.value {
                        Some(AttributeValue::Literal(value)) => value.clone(),
                        _ => String::new(),
                    };
                    Some((property.name.clone(), value))
                }
                AttributeContent::Expression(_) => None,
            })
            .collect();
        Some(Directive {
            name: name.to_string(),
            label,
            attributes,
        })
    }
}

/// Flow extension element (`dl`, `dt`, `dd`)
pub fn flow_element(name: &str, children: Vec<Node>) -> Node {
    Node::MdxJsxFlowElement(MdxJsxFlowElement {
        children,
        position: None,
        name: Some(name.to_string()),
        attributes: Vec::new(),
    })
}

/// Text extension element (`u`, `sup`, `sub`)
pub fn text_element(name: &str, children: Vec<Node>) -> Node {
    Node::MdxJsxTextElement(MdxJsxTextElement {
        children,
        position: None,
        name: Some(name.to_string()),
        attributes: Vec::new(),
    })
}

/// Name of a flow or text extension element
pub fn element_name(node: &Node) -> Option<&str> {
    match node {
        Node::MdxJsxFlowElement(element) => element.name.as_deref(),
        Node::MdxJsxTextElement(element) => element.name.as_deref(),
        _ => None,
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(Text {
        value: value.into(),
        position: None,
    })
}
