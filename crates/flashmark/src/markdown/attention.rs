//! Paired-delimiter marks: `=underline=`, `^superscript^`, `~subscript~`
//!
//! A delimiter is a single character; doubled runs never form a mark. It
//! opens when followed by non-whitespace and not preceded by an
//! alphanumeric, and closes when preceded by non-whitespace and not
//! followed by an alphanumeric. A mark may span sibling nodes, so
//! `=a **b** c=` wraps the strong node too.

use super::ext::{self, MEDIA_DIRECTIVES, Mark};
use markdown::mdast::Node;

/// Stand-in for a neighbouring non-text node when classifying delimiters
const OBJECT: char = '\u{FFFC}';

pub fn apply(node: &mut Node, mark: Mark) {
    if matches!(node, Node::Code(_) | Node::InlineCode(_)) {
        return;
    }
    if ext::element_name(node).is_some_and(|name| MEDIA_DIRECTIVES.contains(&name)) {
        return;
    }
    let Some(children) = node.children_mut() else {
        return;
    };
    apply_to_children(children, mark);
    for child in children.iter_mut() {
        apply(child, mark);
    }
}

fn apply_to_children(children: &mut Vec<Node>, mark: Mark) {
    let delimiter = mark.delimiter();
    let mut index = 0;
    let mut offset = 0;

    while index < children.len() {
        let Some(open) = find(children, (index, offset), delimiter, can_open) else {
            return;
        };
        match find(children, (open.0, open.1 + 1), delimiter, can_close) {
            Some(close) => {
                index = wrap(children, open, close, mark);
                offset = 0;
            }
            None => {
                index = open.0;
                offset = open.1 + 1;
            }
        }
    }
}

/// First single delimiter at or after `from` accepted by `accept`
fn find(
    children: &[Node],
    from: (usize, usize),
    delimiter: char,
    accept: fn(Option<char>, Option<char>) -> bool,
) -> Option<(usize, usize)> {
    for index in from.0..children.len() {
        let Node::Text(text) = &children[index] else {
            continue;
        };
        let start = if index == from.0 { from.1 } else { 0 };
        if start > text.value.len() {
            continue;
        }
        for (offset, c) in text.value[start..].char_indices() {
            let offset = start + offset;
            if c != delimiter {
                continue;
            }
            let before = previous_char(children, index, offset);
            let after = next_char(children, index, offset + 1);
            if before != Some(delimiter) && after != Some(delimiter) && accept(before, after) {
                return Some((index, offset));
            }
        }
    }
    None
}

fn can_open(before: Option<char>, after: Option<char>) -> bool {
    after.is_some_and(|c| !c.is_whitespace()) && !before.is_some_and(char::is_alphanumeric)
}

fn can_close(before: Option<char>, after: Option<char>) -> bool {
    before.is_some_and(|c| !c.is_whitespace()) && !after.is_some_and(char::is_alphanumeric)
}

fn previous_char(children: &[Node], index: usize, offset: usize) -> Option<char> {
    if let Node::Text(text) = &children[index] {
        if let Some(c) = text.value[..offset].chars().next_back() {
            return Some(c);
        }
    }
    let previous = children.get(index.checked_sub(1)?)?;
    Some(edge_char(previous, false))
}

fn next_char(children: &[Node], index: usize, offset: usize) -> Option<char> {
    if let Node::Text(text) = &children[index] {
        if let Some(c) = text.value.get(offset..).and_then(|rest| rest.chars().next()) {
            return Some(c);
        }
    }
    Some(edge_char(children.get(index + 1)?, true))
}

fn edge_char(node: &Node, first: bool) -> char {
    match node {
        Node::Text(text) if first => text.value.chars().next().unwrap_or(' '),
        Node::Text(text) => text.value.chars().next_back().unwrap_or(' '),
        Node::Break(_) => '\n',
        _ => OBJECT,
    }
}

fn text_value(node: &Node) -> &str {
    match node {
        Node::Text(text) => &text.value,
        _ => "",
    }
}

/// Replaces the delimited span with a mark node; returns the index after it
fn wrap(children: &mut Vec<Node>, open: (usize, usize), close: (usize, usize), mark: Mark) -> usize {
    let first = text_value(&children[open.0]).to_string();
    let last = text_value(&children[close.0]).to_string();
    let spanned: Vec<Node> = children.drain(open.0..=close.0).collect();

    let before = &first[..open.1];
    let after = &last[close.1 + 1..];
    let mut inner = Vec::new();
    if open.0 == close.0 {
        inner.push(ext::text(&first[open.1 + 1..close.1]));
    } else {
        let head = &first[open.1 + 1..];
        if !head.is_empty() {
            inner.push(ext::text(head));
        }
        let middle = spanned.len().saturating_sub(1);
        inner.extend(spanned.into_iter().take(middle).skip(1));
        let tail = &last[..close.1];
        if !tail.is_empty() {
            inner.push(ext::text(tail));
        }
    }

    let mut replacement = Vec::new();
    if !before.is_empty() {
        replacement.push(ext::text(before));
    }
    replacement.push(ext::text_element(mark.tag(), inner));
    let resume = open.0 + replacement.len();
    if !after.is_empty() {
        replacement.push(ext::text(after));
    }
    children.splice(open.0..open.0, replacement);
    resume
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ext::{element_name, text, text_element};
    use markdown::mdast::{Paragraph, Strong};

    fn paragraph(children: Vec<Node>) -> Node {
        Node::Paragraph(Paragraph {
            children,
            position: None,
        })
    }

    fn strong(children: Vec<Node>) -> Node {
        Node::Strong(Strong {
            children,
            position: None,
        })
    }

    #[test]
    fn test_single_text_mark() {
        let mut node = paragraph(vec![text("a =b= c")]);
        apply(&mut node, Mark::Underline);
        assert_eq!(
            node.children().unwrap(),
            &vec![text("a "), text_element("u", vec![text("b")]), text(" c")]
        );
    }

    #[test]
    fn test_mark_spans_siblings() {
        let mut node = paragraph(vec![
            text("=underlined "),
            strong(vec![text("bold")]),
            text(" text="),
        ]);
        apply(&mut node, Mark::Underline);
        assert_eq!(
            node.children().unwrap(),
            &vec![text_element(
                "u",
                vec![
                    text("underlined "),
                    strong(vec![text("bold")]),
                    text(" text"),
                ]
            )]
        );
    }

    #[test]
    fn test_doubled_delimiter_is_text() {
        let mut node = paragraph(vec![text("a ==b== c")]);
        apply(&mut node, Mark::Underline);
        assert_eq!(node.children().unwrap(), &vec![text("a ==b== c")]);
    }

    #[test]
    fn test_intraword_delimiter_is_text() {
        let mut node = paragraph(vec![text("x=1 and y=2")]);
        apply(&mut node, Mark::Underline);
        assert_eq!(node.children().unwrap(), &vec![text("x=1 and y=2")]);
    }

    #[test]
    fn test_spaced_delimiters_are_text() {
        let mut node = paragraph(vec![text("1 ^ 2 ^ 3")]);
        apply(&mut node, Mark::Superscript);
        assert_eq!(node.children().unwrap().len(), 1);
    }

    #[test]
    fn test_several_marks() {
        let mut node = paragraph(vec![text("x ~2~ and CO~2~")]);
        apply(&mut node, Mark::Subscript);
        let names: Vec<_> = node
            .children()
            .unwrap()
            .iter()
            .filter_map(element_name)
            .collect();
        assert_eq!(names, vec!["sub"]);
    }

    #[test]
    fn test_unclosed_mark_is_text() {
        let mut node = paragraph(vec![text("^sup")]);
        apply(&mut node, Mark::Superscript);
        assert_eq!(node.children().unwrap(), &vec![text("^sup")]);
    }
}
