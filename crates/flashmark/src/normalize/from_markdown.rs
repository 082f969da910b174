//! Markdown Normalizer: block structure to flat dialect
//!
//! Inverse of the Html Normalizer. Paragraphs are unwrapped into break
//! runs, headerless tables get their header rows moved into the body, and
//! table text is split on the line break sentinel.

use super::{HEADERLESS_ATTRIBUTE, rename_tag};
use crate::context::Context;
use crate::table_newline::TableNewline;
use crate::tree::{Element, Node};

/// Mutates a tree produced from the structured model in place
pub fn normalize_markdown(root: &mut Element, context: Context) {
    tracing::debug!(nodes = root.node_count(), "normalizing structured tree");
    mutate(root, context);
}

fn mutate(element: &mut Element, context: Context) {
    if element.children.is_empty() {
        return;
    }
    let context = context.enter(&element.tag);

    // Row groups are repaired before cell text is decoded
    if element.is("table") && element.attributes.remove(HEADERLESS_ATTRIBUTE).is_some() {
        repair_headerless(element);
    }

    let codec = context.table_sentinel().map(TableNewline::new);
    let mut result = Vec::with_capacity(element.children.len());
    let mut follows_inline = false;

    for child in std::mem::take(&mut element.children) {
        if matches!(&child, Node::Text(value) if value == "\n") {
            continue;
        }
        let inline_before = follows_inline;
        follows_inline = child.is_phrasing() || child.is_element("p");

        match child {
            Node::Text(value) => match codec {
                Some(codec) => result.extend(codec.decode(&value)),
                None => result.push(Node::Text(value)),
            },
            Node::Element(mut paragraph) if paragraph.is("p") => {
                if inline_before && !context.forbids_paragraphs() {
                    result.push(Node::element("br", vec![]));
                    result.push(Node::element("br", vec![]));
                }
                mutate(&mut paragraph, context);
                result.extend(paragraph.children);
            }
            Node::Element(mut child) => {
                rename_tag(&mut child, &[("em", "i"), ("strong", "b")]);
                mutate(&mut child, context);
                result.push(Node::Element(child));
            }
        }
    }

    element.children = result;
}

/// Moves header rows to the start of the body and downgrades header cells
///
/// Without a body group the header group becomes the body.
fn repair_headerless(table: &mut Element) {
    let mut header_rows = Vec::new();
    let mut head_index = None;
    let mut groups = Vec::with_capacity(table.children.len());

    for child in std::mem::take(&mut table.children) {
        match child {
            Node::Element(group) if group.is("thead") => {
                head_index.get_or_insert(groups.len());
                header_rows.extend(group.children);
            }
            other => groups.push(other),
        }
    }
    table.children = groups;

    if !header_rows.is_empty() {
        let body_index = table.children.iter().position(|c| c.is_element("tbody"));
        match body_index.and_then(|index| table.children[index].as_element_mut()) {
            Some(body) => {
                body.children.splice(0..0, header_rows);
            }
            None => {
                let body = Node::element("tbody", header_rows);
                let index = head_index.unwrap_or(0).min(table.children.len());
                table.children.insert(index, body);
            }
        }
    }

    downgrade_header_cells(&mut table.children);
    tracing::debug!("repaired headerless table");
}

fn downgrade_header_cells(nodes: &mut [Node]) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.is("th") {
                element.tag = "td".to_string();
            } else if !element.is("table") {
                downgrade_header_cells(&mut element.children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpreadMode;
    use crate::tree::{ROOT_TAG, parse_html, to_html};

    fn normalize_tree(mut root: Element) -> Element {
        normalize_markdown(&mut root, Context::new(Some('¨'), SpreadMode::Auto));
        root
    }

    fn normalized(html: &str) -> String {
        to_html(&normalize_tree(parse_html(html).unwrap()))
    }

    #[test]
    fn test_paragraphs_become_break_runs() {
        assert_eq!(
            normalized("<p>A paragraph</p><p>A second paragraph</p>"),
            "A paragraph<br><br>A second paragraph"
        );
    }

    #[test]
    fn test_no_breaks_around_lists() {
        assert_eq!(
            normalized("<p>Nested list:</p><ul><li>One</li></ul><p>After</p>"),
            "Nested list:<ul><li>One</li></ul>After"
        );
    }

    #[test]
    fn test_loose_item_paragraphs() {
        assert_eq!(
            normalized("<ul><li><p>One {{c3::</p><ul><li>Alpha</li></ul><p>}}</p></li><li><p>Two</p></li></ul>"),
            "<ul><li>One {{c3::<ul><li>Alpha</li></ul>}}</li><li>Two</li></ul>"
        );
        assert_eq!(
            normalized("<ul><li><p>a</p><p>b</p></li></ul>"),
            "<ul><li>a<br><br>b</li></ul>"
        );
    }

    #[test]
    fn test_renames_semantic_tags() {
        assert_eq!(
            normalized("<p>Some <em>it</em> <strong>bold</strong></p>"),
            "Some <i>it</i> <b>bold</b>"
        );
    }

    #[test]
    fn test_headerless_table_repair() {
        let mut table = parse_html(
            "<table><thead><tr><th>a</th><th>b</th></tr></thead><tbody><tr><td>c</td><td>d</td></tr></tbody></table>",
        )
        .unwrap();
        if let Some(Node::Element(element)) = table.children.first_mut() {
            element.attributes.set(HEADERLESS_ATTRIBUTE, "");
        }
        let html = to_html(&normalize_tree(table));
        assert_eq!(
            html,
            "<table><tbody><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></tbody></table>"
        );
        assert!(!html.contains("<th"));
        assert!(!html.contains("headerless"));
    }

    #[test]
    fn test_headerless_table_without_body() {
        let row = Node::element("tr", vec![Node::element("th", vec![Node::text("only")])]);
        let table = Element::with_children("table", vec![Node::element("thead", vec![row])])
            .with_attr(HEADERLESS_ATTRIBUTE, "");
        let root = Element::with_children(ROOT_TAG, vec![Node::Element(table)]);
        assert_eq!(
            to_html(&normalize_tree(root)),
            "<table><tbody><tr><td>only</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_table_with_header_is_untouched() {
        let html = "<table><thead><tr><th align=\"left\">GFM</th></tr></thead><tbody><tr><td align=\"left\">table</td></tr></tbody></table>";
        assert_eq!(normalized(html), html);
    }

    #[test]
    fn test_sentinel_in_cells_becomes_break() {
        assert_eq!(
            normalized("<table><tbody><tr><td>with¨a</td><td>x\\¨y</td></tr></tbody></table>"),
            "<table><tbody><tr><td>with<br>a</td><td>x\\¨y</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_sentinel_outside_table_is_text() {
        assert_eq!(normalized("<p>a¨b</p>"), "a¨b");
    }

    #[test]
    fn test_heading_is_not_unwrapped() {
        assert_eq!(
            normalized("<h2>Ok</h2><p>Paragraph</p>"),
            "<h2>Ok</h2>Paragraph"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "<p>A</p><p>B</p><ul><li><p>x</p><p>y</p></li></ul>",
            "<table><tbody><tr><td>with¨a</td></tr></tbody></table>",
        ];
        for input in inputs {
            let once = normalize_tree(parse_html(input).unwrap());
            let twice = normalize_tree(once.clone());
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }
}
