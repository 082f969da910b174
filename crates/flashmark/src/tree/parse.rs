//! HTML fragment parsing into the tree model

use super::{Attributes, Element, Node, ROOT_TAG};
use crate::error::{FlashmarkError, Result};
use html5ever::parse_fragment;
use html5ever::tendril::TendrilSink;
use markup5ever::{LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Parses an HTML fragment (body context) into a synthetic root element
///
/// # Errors
///
/// Returns `HtmlParse` if the input stream cannot be read. Malformed markup
/// is recovered by the HTML parser and never reported.
pub fn parse_html(html: &str) -> Result<Element> {
    let context = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from("body"),
    );
    let dom = parse_fragment(RcDom::default(), Default::default(), context, vec![])
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| FlashmarkError::HtmlParse(e.to_string()))?;

    if !dom.errors.is_empty() {
        tracing::trace!("html5ever recovered from {} parse errors", dom.errors.len());
    }

    // Fragment content lives under the `html` element of the document
    let mut root = Element::new(ROOT_TAG);
    for child in dom.document.children.borrow().iter() {
        match &child.data {
            NodeData::Element { name, .. } if name.local.as_ref() == "html" => {
                root.children.extend(convert_children(child));
            }
            _ => {
                if let Some(node) = convert_node(child) {
                    root.children.push(node);
                }
            }
        }
    }
    Ok(root)
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

/// Converts one DOM node; comments, doctypes and instructions are dropped
fn convert_node(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            let attributes: Attributes = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            Some(Node::Element(Element {
                tag: name.local.to_string(),
                attributes,
                children: convert_children(handle),
            }))
        }
        _ => None,
    }
}
