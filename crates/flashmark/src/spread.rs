//! List tightness across the format boundary
//!
//! The flat dialect has no notion of loose or tight lists. Descending into
//! it, each list element gets one of two marker classes; ascending out of
//! it, spread is recovered from that marker and from the item structure.

use crate::config::SpreadMode;
use crate::tree::{Attributes, Element, Node};
use markdown::mdast;

pub const LOOSE_CLASS: &str = "markdown-loose";
pub const TIGHT_CLASS: &str = "markdown-tight";

/// Persisted list tightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Loose,
    Tight,
}

impl ListMarker {
    pub fn class(self) -> &'static str {
        match self {
            ListMarker::Loose => LOOSE_CLASS,
            ListMarker::Tight => TIGHT_CLASS,
        }
    }

    /// Marker carried by a flat list element, if any
    pub fn from_attributes(attributes: &Attributes) -> Option<ListMarker> {
        if attributes.has_class(LOOSE_CLASS) {
            Some(ListMarker::Loose)
        } else if attributes.has_class(TIGHT_CLASS) {
            Some(ListMarker::Tight)
        } else {
            None
        }
    }

    pub fn is_loose(self) -> bool {
        self == ListMarker::Loose
    }
}

/// Marker to emit for a structured list (descent)
pub fn list_marker(list: &mdast::List, mode: SpreadMode) -> ListMarker {
    let spread = match mode {
        SpreadMode::Loose => true,
        SpreadMode::Tight => false,
        SpreadMode::Auto => {
            list.spread
                || list
                    .children
                    .iter()
                    .any(|child| matches!(child, mdast::Node::ListItem(item) if item.spread))
        }
    };
    if spread {
        ListMarker::Loose
    } else {
        ListMarker::Tight
    }
}

/// Spread of a flat list element (ascent)
///
/// Outside auto mode the persisted marker alone decides.
pub fn list_spread(list: &Element, mode: SpreadMode) -> bool {
    let marked_loose = ListMarker::from_attributes(&list.attributes).is_some_and(ListMarker::is_loose);
    if mode != SpreadMode::Auto {
        return marked_loose;
    }
    marked_loose
        || list
            .children
            .iter()
            .filter_map(Node::as_element)
            .filter(|child| child.is("li"))
            .any(|item| item_spread(item, mode))
}

/// Spread of a flat list item (ascent)
///
/// An item is spread when it holds an explicit paragraph, two sequential
/// flow children, or a nested list that is itself spread. One flow child
/// alone is not enough.
pub fn item_spread(item: &Element, mode: SpreadMode) -> bool {
    contains_spread(&item.children, mode)
}

fn contains_spread(children: &[Node], mode: SpreadMode) -> bool {
    let mut sequential_flow = 0;
    for child in children {
        let element = match child {
            Node::Element(element) => element,
            Node::Text(value) => {
                if !value.trim().is_empty() {
                    sequential_flow = 0;
                }
                continue;
            }
        };
        if child.is_phrasing() {
            sequential_flow = 0;
            continue;
        }
        if element.is("p") {
            return true;
        }
        let nested_spread = if element.is_list() {
            list_spread(element, mode)
        } else {
            contains_spread(&element.children, mode)
        };
        if nested_spread {
            return true;
        }
        sequential_flow += 1;
        if sequential_flow >= 2 {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_html;

    fn first_element(html: &str) -> Element {
        let root = parse_html(html).unwrap();
        match root.children.into_iter().next() {
            Some(Node::Element(element)) => element,
            _ => panic!("Expected element"),
        }
    }

    fn item(children: Vec<mdast::Node>, spread: bool) -> mdast::Node {
        mdast::Node::ListItem(mdast::ListItem {
            children,
            position: None,
            spread,
            checked: None,
        })
    }

    fn list(children: Vec<mdast::Node>, spread: bool) -> mdast::List {
        mdast::List {
            children,
            position: None,
            ordered: false,
            start: None,
            spread,
        }
    }

    #[test]
    fn test_single_flow_child_is_not_spread() {
        let li = first_element("<li>One<ul><li>Alpha</li></ul></li>");
        assert!(!item_spread(&li, SpreadMode::Auto));
    }

    #[test]
    fn test_explicit_paragraph_is_spread() {
        let li = first_element("<li><p>One</p></li>");
        assert!(item_spread(&li, SpreadMode::Auto));
    }

    #[test]
    fn test_two_sequential_flow_children_are_spread() {
        let li = first_element("<li><ul><li>a</li></ul><ol><li>b</li></ol></li>");
        assert!(item_spread(&li, SpreadMode::Auto));
    }

    #[test]
    fn test_phrasing_resets_flow_count() {
        let li = first_element("<li><ul><li>a</li></ul>text<ol><li>b</li></ol></li>");
        assert!(!item_spread(&li, SpreadMode::Auto));
    }

    #[test]
    fn test_spread_nested_list_spreads_item() {
        let li = first_element(r#"<li>One<ul class="markdown-loose"><li>a</li></ul></li>"#);
        assert!(item_spread(&li, SpreadMode::Auto));
    }

    #[test]
    fn test_list_spread_propagates_from_items() {
        let ul = first_element("<ul><li>a</li><li><p>b</p></li></ul>");
        assert!(list_spread(&ul, SpreadMode::Auto));

        let ul = first_element("<ul><li>a</li><li>b</li></ul>");
        assert!(!list_spread(&ul, SpreadMode::Auto));
    }

    #[test]
    fn test_marker_recovers_looseness() {
        let ul = first_element(r#"<ul class="markdown-loose"><li>a</li></ul>"#);
        assert!(list_spread(&ul, SpreadMode::Auto));
        assert!(list_spread(&ul, SpreadMode::Tight));
    }

    #[test]
    fn test_non_auto_ascent_uses_marker_only() {
        let ul = first_element(r#"<ul class="markdown-tight"><li><p>a</p></li></ul>"#);
        assert!(list_spread(&ul, SpreadMode::Auto));
        assert!(!list_spread(&ul, SpreadMode::Loose));
    }

    #[test]
    fn test_descent_marker() {
        let tight = list(vec![item(vec![], false), item(vec![], false)], false);
        let loose_item = list(vec![item(vec![], false), item(vec![], true)], false);

        assert_eq!(list_marker(&tight, SpreadMode::Auto), ListMarker::Tight);
        assert_eq!(list_marker(&loose_item, SpreadMode::Auto), ListMarker::Loose);
        assert_eq!(list_marker(&tight, SpreadMode::Loose), ListMarker::Loose);
        assert_eq!(list_marker(&loose_item, SpreadMode::Tight), ListMarker::Tight);
        assert_eq!(ListMarker::Loose.class(), "markdown-loose");
    }
}
