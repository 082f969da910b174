//! Whitespace and flow helpers for the ascent

use crate::markdown::ext::{self, MEDIA_DIRECTIVES};
use markdown::mdast::{List, Node, Paragraph};

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Collapses runs of ASCII whitespace to a single space
pub fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_space = false;
    for c in value.chars() {
        if is_space(c) {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

pub fn is_phrasing(node: &Node) -> bool {
    matches!(
        node,
        Node::Text(_)
            | Node::Emphasis(_)
            | Node::Strong(_)
            | Node::Delete(_)
            | Node::Break(_)
            | Node::Link(_)
            | Node::Image(_)
            | Node::InlineCode(_)
            | Node::Html(_)
            | Node::MdxJsxTextElement(_)
    )
}

/// Phrasing containers whose edges take part in whitespace trimming
fn is_inline_container(node: &Node) -> bool {
    match node {
        Node::Emphasis(_) | Node::Strong(_) | Node::Delete(_) | Node::Link(_) => true,
        Node::MdxJsxTextElement(_) => {
            !ext::element_name(node).is_some_and(|name| MEDIA_DIRECTIVES.contains(&name))
        }
        _ => false,
    }
}

/// Groups phrasing runs into paragraphs and stray items into lists
pub fn to_flow(nodes: Vec<Node>) -> Vec<Node> {
    let mut flow = Vec::with_capacity(nodes.len());
    let mut run: Vec<Node> = Vec::new();
    let mut items: Vec<Node> = Vec::new();

    for node in nodes {
        if is_phrasing(&node) {
            flush_items(&mut items, &mut flow);
            run.push(node);
        } else if matches!(node, Node::ListItem(_)) {
            flush_run(&mut run, &mut flow);
            items.push(node);
        } else {
            flush_run(&mut run, &mut flow);
            flush_items(&mut items, &mut flow);
            flow.push(node);
        }
    }
    flush_run(&mut run, &mut flow);
    flush_items(&mut items, &mut flow);
    flow
}

fn flush_run(run: &mut Vec<Node>, flow: &mut Vec<Node>) {
    let children = clean_inline(std::mem::take(run));
    if !children.is_empty() {
        flow.push(Node::Paragraph(Paragraph {
            children,
            position: None,
        }));
    }
}

fn flush_items(items: &mut Vec<Node>, flow: &mut Vec<Node>) {
    if items.is_empty() {
        return;
    }
    let children = std::mem::take(items);
    let spread = children
        .iter()
        .any(|item| matches!(item, Node::ListItem(item) if item.spread));
    flow.push(Node::List(List {
        children,
        position: None,
        ordered: false,
        start: None,
        spread,
    }));
}

/// Tidies the content of an inline container
///
/// Joins adjacent text, drops edge whitespace and edge breaks, trims
/// whitespace around breaks and collapses spaces doubled across siblings.
pub fn clean_inline(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match (out.last_mut(), node) {
            (Some(Node::Text(previous)), Node::Text(text)) => {
                previous.value.push_str(&text.value);
                previous.value = collapse_whitespace_keep(&previous.value);
            }
            (_, node) => out.push(node),
        }
    }

    for index in 0..out.len() {
        if matches!(out[index], Node::Break(_)) {
            if index > 0 {
                trim_deep(&mut out[index - 1], false);
            }
            if index + 1 < out.len() {
                trim_deep(&mut out[index + 1], true);
            }
        }
    }
    for index in 1..out.len() {
        if last_char_deep(&out[index - 1]) == Some(' ') {
            trim_deep(&mut out[index], true);
        }
    }

    out.retain(|node| !is_empty_text(node));
    trim_edge(&mut out, true);
    trim_edge(&mut out, false);
    out
}

/// Collapses doubled spaces created by joining, without touching other
/// whitespace such as non-breaking spaces
fn collapse_whitespace_keep(value: &str) -> String {
    if value.contains("  ") {
        collapse_whitespace(value)
    } else {
        value.to_string()
    }
}

fn is_empty_text(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.value.is_empty())
}

/// Strips whitespace and breaks from one end of an inline sequence
fn trim_edge(nodes: &mut Vec<Node>, start: bool) {
    loop {
        let index = if start { 0 } else { nodes.len().wrapping_sub(1) };
        let Some(node) = nodes.get_mut(index) else {
            return;
        };
        match node {
            Node::Break(_) => {
                nodes.remove(index);
            }
            Node::Text(text) => {
                let trimmed = if start {
                    text.value.trim_start_matches(is_space)
                } else {
                    text.value.trim_end_matches(is_space)
                };
                if trimmed.is_empty() {
                    nodes.remove(index);
                } else {
                    text.value = trimmed.to_string();
                    return;
                }
            }
            node if is_inline_container(node) => {
                let emptied = match node.children_mut() {
                    Some(children) => {
                        trim_edge(children, start);
                        children.is_empty() && !matches!(node, Node::Link(_))
                    }
                    None => false,
                };
                if emptied {
                    nodes.remove(index);
                } else {
                    return;
                }
            }
            _ => return,
        }
    }
}

/// Trims whitespace at one end of the first/last text inside `node`
fn trim_deep(node: &mut Node, start: bool) {
    match node {
        Node::Text(text) => {
            let trimmed = if start {
                text.value.trim_start_matches(is_space)
            } else {
                text.value.trim_end_matches(is_space)
            };
            text.value = trimmed.to_string();
        }
        node if is_inline_container(node) => {
            if let Some(children) = node.children_mut() {
                let edge = if start { children.first_mut() } else { children.last_mut() };
                if let Some(edge) = edge {
                    trim_deep(edge, start);
                }
            }
        }
        _ => {}
    }
}

fn last_char_deep(node: &Node) -> Option<char> {
    match node {
        Node::Text(text) => text.value.chars().next_back(),
        node if is_inline_container(node) => node.children()?.last().and_then(last_char_deep),
        _ => None,
    }
}

/// Reduces flow content to phrasing content, for cells and terms
pub fn flatten_to_phrasing(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if is_phrasing(&node) {
            out.push(node);
            continue;
        }
        if !out.is_empty() {
            out.push(ext::text(" "));
        }
        match node {
            Node::Code(code) => out.push(Node::InlineCode(markdown::mdast::InlineCode {
                value: code.value,
                position: None,
            })),
            mut node => {
                if let Some(children) = node.children_mut() {
                    out.extend(flatten_to_phrasing(std::mem::take(children)));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ext::text;
    use markdown::mdast::{Break, Strong};

    fn strong(children: Vec<Node>) -> Node {
        Node::Strong(Strong {
            children,
            position: None,
        })
    }

    fn br() -> Node {
        Node::Break(Break { position: None })
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("a\u{a0} b"), "a\u{a0} b");
    }

    #[test]
    fn test_clean_inline_trims_edges_and_breaks() {
        let cleaned = clean_inline(vec![
            text(" a "),
            br(),
            text(" b"),
            strong(vec![text(" c ")]),
            br(),
        ]);
        assert_eq!(
            cleaned,
            vec![text("a"), br(), text("b"), strong(vec![text(" c")])]
        );
    }

    #[test]
    fn test_clean_inline_keeps_nbsp() {
        let cleaned = clean_inline(vec![text("Inline media:\u{a0}")]);
        assert_eq!(cleaned, vec![text("Inline media:\u{a0}")]);
    }

    #[test]
    fn test_to_flow_wraps_runs_and_drops_blank() {
        let rule = Node::ThematicBreak(markdown::mdast::ThematicBreak { position: None });
        let flow = to_flow(vec![text(" "), text("a"), rule, text(" ")]);
        assert_eq!(flow.len(), 2);
        assert!(matches!(flow[0], Node::Paragraph(_)));
    }

}
