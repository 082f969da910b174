//! Definition lists
//!
//! ```text
//! Term
//! :   Definition
//! ```
//!
//! A paragraph whose lines are terms followed by `:` lines becomes a `dl`.
//! After a definition, a plain line starts the next term when a `:` line
//! follows it and continues the definition otherwise. Adjacent lists merge.

use super::ext::{self, flow_element};
use markdown::mdast::Node;

type Line = Vec<Node>;

#[derive(Default)]
struct Group {
    terms: Vec<Line>,
    definitions: Vec<Line>,
}

/// Rewrites definition-list paragraphs in every flow container
pub fn build(node: &mut Node) {
    if let Some(children) = node.children_mut() {
        if children.iter().any(|child| matches!(child, Node::Paragraph(_))) {
            rewrite_flow(children);
        }
        for child in children.iter_mut() {
            build(child);
        }
    }
}

fn rewrite_flow(children: &mut Vec<Node>) {
    let mut out: Vec<Node> = Vec::with_capacity(children.len());
    for child in std::mem::take(children) {
        let Node::Paragraph(paragraph) = child else {
            out.push(child);
            continue;
        };
        let Some(items) = definition_items(&paragraph.children) else {
            out.push(Node::Paragraph(paragraph));
            continue;
        };
        match out.last_mut() {
            Some(previous) if ext::element_name(previous) == Some("dl") => {
                if let Some(list) = previous.children_mut() {
                    list.extend(items);
                }
            }
            _ => out.push(flow_element("dl", items)),
        }
    }
    *children = out;
}

/// `dt`/`dd` items of a definition-list paragraph
fn definition_items(inline: &[Node]) -> Option<Vec<Node>> {
    let lines = split_lines(inline);
    if lines.len() < 2 || is_definition(&lines[0]) || !lines.iter().any(|l| is_definition(l)) {
        return None;
    }

    let mut groups: Vec<Group> = vec![Group::default()];
    for (index, line) in lines.iter().enumerate() {
        let group = groups.last_mut()?;
        if is_definition(line) {
            group.definitions.push(strip_colon(line));
        } else if group.definitions.is_empty() {
            group.terms.push(line.clone());
        } else if lines.get(index + 1).is_some_and(|next| is_definition(next)) {
            groups.push(Group {
                terms: vec![line.clone()],
                definitions: Vec::new(),
            });
        } else if let Some(definition) = group.definitions.last_mut() {
            definition.push(ext::text("\n"));
            definition.extend(line.iter().cloned());
        }
    }
    if groups.iter().any(|group| group.definitions.is_empty()) {
        return None;
    }

    let mut items = Vec::new();
    for group in groups {
        items.extend(group.terms.into_iter().map(|term| flow_element("dt", merge(term))));
        items.extend(
            group
                .definitions
                .into_iter()
                .map(|definition| flow_element("dd", merge(definition))),
        );
    }
    Some(items)
}

/// Splits inline content at soft line breaks
fn split_lines(inline: &[Node]) -> Vec<Line> {
    let mut lines = vec![Vec::new()];
    for node in inline {
        match node {
            Node::Text(text) if text.value.contains('\n') => {
                for (index, piece) in text.value.split('\n').enumerate() {
                    if index > 0 {
                        lines.push(Vec::new());
                    }
                    if !piece.is_empty() {
                        if let Some(line) = lines.last_mut() {
                            line.push(ext::text(piece));
                        }
                    }
                }
            }
            other => {
                if let Some(line) = lines.last_mut() {
                    line.push(other.clone());
                }
            }
        }
    }
    lines
}

fn is_definition(line: &[Node]) -> bool {
    match line.first() {
        Some(Node::Text(text)) => {
            let mut chars = text.value.chars();
            chars.next() == Some(':') && matches!(chars.next(), Some(' ' | '\t'))
        }
        _ => false,
    }
}

fn strip_colon(line: &[Node]) -> Line {
    let mut line = line.to_vec();
    if let Some(Node::Text(text)) = line.first_mut() {
        text.value = text.value[1..].trim_start().to_string();
    }
    line.retain(|node| !matches!(node, Node::Text(text) if text.value.is_empty()));
    line
}

/// Joins adjacent text nodes
fn merge(line: Line) -> Line {
    let mut out: Line = Vec::with_capacity(line.len());
    for node in line {
        match (out.last_mut(), node) {
            (Some(Node::Text(previous)), Node::Text(text)) => previous.value.push_str(&text.value),
            (_, node) => out.push(node),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ext::text;
    use markdown::mdast::{Paragraph, Root, Strong};

    fn paragraph(children: Vec<Node>) -> Node {
        Node::Paragraph(Paragraph {
            children,
            position: None,
        })
    }

    fn root(children: Vec<Node>) -> Node {
        Node::Root(Root {
            children,
            position: None,
        })
    }

    fn names(node: &Node) -> Vec<&str> {
        node.children()
            .unwrap()
            .iter()
            .filter_map(ext::element_name)
            .collect()
    }

    #[test]
    fn test_term_and_definition() {
        let mut tree = root(vec![paragraph(vec![
            text("Term\n:   And its "),
            Node::Strong(Strong {
                children: vec![text("bold")],
                position: None,
            }),
            text(" definition"),
        ])]);
        build(&mut tree);

        let dl = &tree.children().unwrap()[0];
        assert_eq!(ext::element_name(dl), Some("dl"));
        assert_eq!(names(dl), vec!["dt", "dd"]);
        let dd = &dl.children().unwrap()[1];
        assert_eq!(dd.children().unwrap()[0], text("And its "));
    }

    #[test]
    fn test_adjacent_lists_merge() {
        let mut tree = root(vec![
            paragraph(vec![text("Term\n: one")]),
            paragraph(vec![text("Second\n: two")]),
        ]);
        build(&mut tree);
        assert_eq!(tree.children().unwrap().len(), 1);
        assert_eq!(
            names(&tree.children().unwrap()[0]),
            vec!["dt", "dd", "dt", "dd"]
        );
    }

    #[test]
    fn test_multiple_terms_and_lazy_continuation() {
        let mut tree = root(vec![paragraph(vec![text(
            "A\nB\n: def\nmore\nC\n: other",
        )])]);
        build(&mut tree);
        let dl = &tree.children().unwrap()[0];
        assert_eq!(names(dl), vec!["dt", "dt", "dd", "dt", "dd"]);
        assert_eq!(dl.children().unwrap()[2].children().unwrap(), &vec![text("def\nmore")]);
    }

    #[test]
    fn test_plain_paragraph_untouched() {
        let mut tree = root(vec![paragraph(vec![text("Time: 10:30\nnext line")])]);
        build(&mut tree);
        assert!(matches!(tree.children().unwrap()[0], Node::Paragraph(_)));
    }

    #[test]
    fn test_trailing_term_without_definition_is_paragraph() {
        let mut tree = root(vec![paragraph(vec![text("A\n: def\nB\nC")])]);
        build(&mut tree);
        let dl = &tree.children().unwrap()[0];
        assert_eq!(names(dl), vec!["dt", "dd"]);
    }
}
