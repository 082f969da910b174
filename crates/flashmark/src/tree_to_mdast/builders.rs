//! mdast node builders for handled tags

use super::helpers::flatten_to_phrasing;
use super::{Handler, TreeConverter};
use crate::config::SpreadMode;
use crate::inline_media;
use crate::markdown::ext::{self, flow_element, text_element};
use crate::spread;
use crate::tree::{self, Element};
use markdown::mdast::{
    AlignKind, Blockquote, Break, Code, Delete, Emphasis, Heading, Image, InlineCode, Link, List,
    ListItem, Node, Paragraph, Strong, Table, TableCell, TableRow, ThematicBreak,
};

/// Builds a paragraph; empty paragraphs are dropped
pub(super) fn build_paragraph(converter: &TreeConverter, element: &Element) -> Option<Node> {
    let children = converter.phrasing(&element.children);
    if children.is_empty() {
        return None;
    }
    Some(Node::Paragraph(Paragraph {
        children,
        position: None,
    }))
}

pub(super) fn build_heading(converter: &TreeConverter, element: &Element, depth: u8) -> Node {
    Node::Heading(Heading {
        children: converter.phrasing(&element.children),
        position: None,
        depth,
    })
}

/// Builds a list; non-item children are gathered into items of their own
pub(super) fn build_list(converter: &TreeConverter, list: &Element, ordered: bool) -> Node {
    let spread = spread::list_spread(list, converter.spread_mode);
    let start = ordered.then(|| {
        list.attributes
            .get("start")
            .and_then(|start| start.trim().parse::<u32>().ok())
            .unwrap_or(1)
    });
    let forced_item_spread = (converter.spread_mode != SpreadMode::Auto).then_some(spread);

    let mut children = Vec::with_capacity(list.children.len());
    let mut stray = Vec::new();
    for child in &list.children {
        match child {
            tree::Node::Element(item) if item.is("li") => {
                push_stray_item(&mut stray, &mut children);
                children.push(build_list_item(converter, item, forced_item_spread));
            }
            other => stray.extend(converter.one(other)),
        }
    }
    push_stray_item(&mut stray, &mut children);

    Node::List(List {
        children,
        position: None,
        ordered,
        start,
        spread,
    })
}

fn push_stray_item(stray: &mut Vec<Node>, items: &mut Vec<Node>) {
    let content = super::helpers::to_flow(std::mem::take(stray));
    if !content.is_empty() {
        items.push(Node::ListItem(ListItem {
            children: content,
            position: None,
            spread: false,
            checked: None,
        }));
    }
}

/// Builds a list item; `forced_spread` overrides the structural spread
pub(super) fn build_list_item(
    converter: &TreeConverter,
    item: &Element,
    forced_spread: Option<bool>,
) -> Node {
    let spread =
        forced_spread.unwrap_or_else(|| spread::item_spread(item, converter.spread_mode));
    Node::ListItem(ListItem {
        children: converter.flow(&item.children),
        position: None,
        spread,
        checked: None,
    })
}

/// Builds a GFM table
///
/// Rows come from `thead`, `tbody`, `tfoot` or the table itself. When the
/// first row is neither in `thead` nor made of header cells, an empty
/// header row is prepended. Returns `None` for a table without rows.
pub(super) fn build_table(converter: &TreeConverter, table: &Element) -> Option<Node> {
    let mut rows: Vec<(bool, &Element)> = Vec::new();
    for child in table.children.iter().filter_map(tree::Node::as_element) {
        match child.tag.as_str() {
            "thead" => rows.extend(table_rows(child).map(|row| (true, row))),
            "tbody" | "tfoot" => rows.extend(table_rows(child).map(|row| (false, row))),
            "tr" => rows.push((false, child)),
            _ => {}
        }
    }
    let (first_in_head, first_row) = *rows.first()?;

    let first_cells: Vec<&Element> = table_cells(first_row).collect();
    let has_header = first_in_head
        || (!first_cells.is_empty() && first_cells.iter().all(|cell| cell.is("th")));
    let columns = rows
        .iter()
        .map(|(_, row)| table_cells(row).count())
        .max()
        .unwrap_or(0);
    let align = (0..columns)
        .map(|column| {
            first_cells
                .get(column)
                .and_then(|cell| cell.attributes.get("align"))
                .map_or(AlignKind::None, parse_align)
        })
        .collect();

    let mut children = Vec::with_capacity(rows.len() + 1);
    if !has_header {
        children.push(Node::TableRow(TableRow {
            children: (0..columns).map(|_| table_cell(Vec::new())).collect(),
            position: None,
        }));
    }
    for (_, row) in &rows {
        children.push(Node::TableRow(TableRow {
            children: table_cells(row)
                .map(|cell| table_cell(converter.phrasing(&cell.children)))
                .collect(),
            position: None,
        }));
    }

    Some(Node::Table(Table {
        children,
        position: None,
        align,
    }))
}

fn table_rows(section: &Element) -> impl Iterator<Item = &Element> {
    section
        .children
        .iter()
        .filter_map(tree::Node::as_element)
        .filter(|row| row.is("tr"))
}

fn table_cells(row: &Element) -> impl Iterator<Item = &Element> {
    row.children
        .iter()
        .filter_map(tree::Node::as_element)
        .filter(|cell| cell.is("td") || cell.is("th"))
}

fn table_cell(children: Vec<Node>) -> Node {
    Node::TableCell(TableCell {
        children,
        position: None,
    })
}

fn parse_align(value: &str) -> AlignKind {
    match value.trim().to_ascii_lowercase().as_str() {
        "left" => AlignKind::Left,
        "right" => AlignKind::Right,
        "center" => AlignKind::Center,
        _ => AlignKind::None,
    }
}

/// Builds emphasis, strong, delete or an extension mark
pub(super) fn build_attention(
    converter: &TreeConverter,
    element: &Element,
    handler: Handler,
) -> Vec<Node> {
    let children = flatten_to_phrasing(converter.all(&element.children));
    if children.is_empty() {
        return Vec::new();
    }
    let node = match handler {
        Handler::Emphasis => Node::Emphasis(Emphasis {
            children,
            position: None,
        }),
        Handler::Strong => Node::Strong(Strong {
            children,
            position: None,
        }),
        Handler::Delete => Node::Delete(Delete {
            children,
            position: None,
        }),
        Handler::Mark(mark) => text_element(mark.tag(), children),
        _ => return children,
    };
    vec![node]
}

pub(super) fn build_break() -> Node {
    Node::Break(Break { position: None })
}

/// Builds a link; an anchor without `href` is unwrapped
pub(super) fn build_link(converter: &TreeConverter, element: &Element) -> Vec<Node> {
    let children = flatten_to_phrasing(converter.all(&element.children));
    let Some(url) = element.attributes.get("href") else {
        return children;
    };
    vec![Node::Link(Link {
        children,
        position: None,
        url: url.to_string(),
        title: element.attributes.get("title").map(str::to_string),
    })]
}

pub(super) fn build_image(element: &Element) -> Node {
    let attributes = &element.attributes;
    Node::Image(Image {
        position: None,
        alt: attributes.get("alt").unwrap_or_default().to_string(),
        url: attributes.get("src").unwrap_or_default().to_string(),
        title: attributes.get("title").map(str::to_string),
    })
}

pub(super) fn build_inline_code(element: &Element) -> Node {
    Node::InlineCode(InlineCode {
        value: element.text_content(),
        position: None,
    })
}

/// Builds a fenced code block from `pre`, reading the language from a
/// `language-*` class on the inner `code`
pub(super) fn build_code_block(element: &Element) -> Node {
    let lang = element
        .children
        .iter()
        .filter_map(tree::Node::as_element)
        .find(|child| child.is("code"))
        .and_then(|code| code.attributes.get("class"))
        .and_then(|class| {
            class
                .split_ascii_whitespace()
                .find_map(|name| name.strip_prefix("language-"))
        })
        .map(str::to_string);
    let mut value = element.text_content();
    if value.ends_with('\n') {
        value.pop();
    }
    Node::Code(Code {
        value,
        position: None,
        lang,
        meta: None,
    })
}

pub(super) fn build_blockquote(converter: &TreeConverter, element: &Element) -> Node {
    Node::Blockquote(Blockquote {
        children: converter.flow(&element.children),
        position: None,
    })
}

pub(super) fn build_thematic_break() -> Node {
    Node::ThematicBreak(ThematicBreak { position: None })
}

/// Builds a definition list from its `dt`/`dd` children
///
/// Wrappers between the list and its items are looked through; stray
/// content becomes a definition.
pub(super) fn build_definition_list(converter: &TreeConverter, list: &Element) -> Node {
    let mut items = Vec::new();
    collect_definition_items(converter, &list.children, &mut items);
    flow_element("dl", items)
}

fn collect_definition_items(converter: &TreeConverter, children: &[tree::Node], items: &mut Vec<Node>) {
    let mut stray: Vec<tree::Node> = Vec::new();
    for child in children {
        match child {
            tree::Node::Element(element) if element.is("dt") || element.is("dd") => {
                push_stray_definition(converter, &mut stray, items);
                items.push(build_definition_part(converter, element));
            }
            tree::Node::Element(element) if !tree::is_phrasing_tag(&element.tag) => {
                push_stray_definition(converter, &mut stray, items);
                collect_definition_items(converter, &element.children, items);
            }
            other => stray.push(other.clone()),
        }
    }
    push_stray_definition(converter, &mut stray, items);
}

fn push_stray_definition(converter: &TreeConverter, stray: &mut Vec<tree::Node>, items: &mut Vec<Node>) {
    let content = converter.phrasing(&std::mem::take(stray));
    if !content.is_empty() {
        items.push(flow_element("dd", content));
    }
}

/// Builds a `dt` or `dd`; phrasing-only content stays inline
pub(super) fn build_definition_part(converter: &TreeConverter, element: &Element) -> Node {
    let content = if element.children.iter().all(tree::Node::is_phrasing) {
        converter.phrasing(&element.children)
    } else {
        converter.flow(&element.children)
    };
    flow_element(&element.tag, content)
}

/// Builds a media directive, or a link when the element is plain media
pub(super) fn build_inline_media(converter: &TreeConverter, element: &Element) -> Vec<Node> {
    match inline_media::element_to_directive(element) {
        Some(directive) => vec![directive.into_node()],
        None => build_media_link(element)
            .map(|link| vec![link])
            .unwrap_or_else(|| converter.all(&element.children)),
    }
}

/// Links to the media source, from `src` or the first `source` child
pub(super) fn build_media_link(element: &Element) -> Option<Node> {
    let src = element.attributes.get("src").or_else(|| {
        element
            .children
            .iter()
            .filter_map(tree::Node::as_element)
            .filter(|child| child.is("source"))
            .find_map(|source| source.attributes.get("src"))
    })?;
    Some(Node::Link(Link {
        children: vec![ext::text(src)],
        position: None,
        url: src.to_string(),
        title: None,
    }))
}
