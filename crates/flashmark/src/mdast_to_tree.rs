//! Structured model to flat tree (descent)
//!
//! The output is not yet in the flat dialect: paragraphs are still `p`
//! elements and headerless tables still carry their transient attribute.
//! [`crate::normalize::normalize_markdown`] finishes the job.

use crate::config::{Pipeline, SpreadMode};
use crate::error::Result;
use crate::inline_media;
use crate::markdown::ParsedMarkdown;
use crate::markdown::ext::{Directive, Mark};
use crate::normalize::HEADERLESS_ATTRIBUTE;
use crate::spread;
use crate::tree::{self, Element};
use markdown::mdast::{AlignKind, Code, List, ListItem, Node, Table, TableRow};
use std::collections::{HashMap, HashSet};

/// Builds the tree for a parsed document
///
/// # Errors
///
/// Returns `InlineMediaLabel` when a media directive has a label that is
/// not a media filename.
pub fn mdast_to_tree(parsed: &ParsedMarkdown, pipeline: &Pipeline) -> Result<Element> {
    let mut definitions = HashMap::new();
    collect_definitions(&parsed.root, &mut definitions);

    let builder = TreeBuilder {
        headerless_lines: &parsed.headerless_lines,
        spread_mode: pipeline.spread_mode,
        definitions,
    };
    let mut root = Element::new(tree::ROOT_TAG);
    if let Some(children) = parsed.root.children() {
        root.children = builder.all(children)?;
    }
    Ok(root)
}

struct LinkTarget {
    url: String,
    title: Option<String>,
}

/// First definition wins for a repeated identifier
fn collect_definitions(node: &Node, definitions: &mut HashMap<String, LinkTarget>) {
    if let Node::Definition(definition) = node {
        definitions
            .entry(definition.identifier.clone())
            .or_insert_with(|| LinkTarget {
                url: definition.url.clone(),
                title: definition.title.clone(),
            });
        return;
    }
    for child in node.children().into_iter().flatten() {
        collect_definitions(child, definitions);
    }
}

struct TreeBuilder<'a> {
    headerless_lines: &'a HashSet<usize>,
    spread_mode: SpreadMode,
    definitions: HashMap<String, LinkTarget>,
}

impl TreeBuilder<'_> {
    fn all(&self, nodes: &[Node]) -> Result<Vec<tree::Node>> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.node(node, &mut out)?;
        }
        Ok(out)
    }

    fn wrap(&self, tag: &str, children: &[Node]) -> Result<tree::Node> {
        Ok(tree::Node::Element(Element::with_children(
            tag,
            self.all(children)?,
        )))
    }

    fn node(&self, node: &Node, out: &mut Vec<tree::Node>) -> Result<()> {
        match node {
            Node::Text(text) => out.push(tree::Node::text(text.value.as_str())),
            // raw HTML is never parsed, any that slips through is text
            Node::Html(html) => out.push(tree::Node::text(html.value.as_str())),
            Node::Paragraph(paragraph) => out.push(self.wrap("p", &paragraph.children)?),
            Node::Heading(heading) => {
                out.push(self.wrap(&format!("h{}", heading.depth), &heading.children)?)
            }
            Node::Emphasis(emphasis) => out.push(self.wrap("em", &emphasis.children)?),
            Node::Strong(strong) => out.push(self.wrap("strong", &strong.children)?),
            Node::Delete(delete) => out.push(self.wrap("del", &delete.children)?),
            Node::Break(_) => out.push(tree::Node::element("br", Vec::new())),
            Node::InlineCode(code) => out.push(tree::Node::element(
                "code",
                vec![tree::Node::text(code.value.as_str())],
            )),
            Node::Code(code) => out.push(tree::Node::Element(code_block(code))),
            Node::Blockquote(quote) => out.push(self.wrap("blockquote", &quote.children)?),
            Node::ThematicBreak(_) => out.push(tree::Node::element("hr", Vec::new())),
            Node::Link(link) => out.push(tree::Node::Element(self.anchor(
                &link.children,
                &link.url,
                link.title.as_deref(),
            )?)),
            Node::Image(image) => out.push(tree::Node::Element(image_element(
                &image.url,
                &image.alt,
                image.title.as_deref(),
            ))),
            Node::LinkReference(reference) => match self.definitions.get(&reference.identifier) {
                Some(target) => out.push(tree::Node::Element(self.anchor(
                    &reference.children,
                    &target.url,
                    target.title.as_deref(),
                )?)),
                None => out.extend(self.all(&reference.children)?),
            },
            Node::ImageReference(reference) => match self.definitions.get(&reference.identifier) {
                Some(target) => out.push(tree::Node::Element(image_element(
                    &target.url,
                    &reference.alt,
                    target.title.as_deref(),
                ))),
                None => out.push(tree::Node::text(reference.alt.as_str())),
            },
            Node::List(list) => out.push(tree::Node::Element(self.list(list)?)),
            Node::ListItem(item) => out.push(tree::Node::Element(self.list_item(item, true)?)),
            Node::Table(table) => out.push(tree::Node::Element(self.table(table)?)),
            Node::MdxJsxFlowElement(element) => match element.name.as_deref() {
                Some(name @ ("dl" | "dt" | "dd")) => out.push(self.wrap(name, &element.children)?),
                _ => out.extend(self.all(&element.children)?),
            },
            Node::MdxJsxTextElement(element) => {
                if let Some(directive) = Directive::from_element(element) {
                    out.push(tree::Node::Element(inline_media::directive_to_element(
                        &directive,
                    )?));
                } else if let Some(mark) = element.name.as_deref().and_then(Mark::from_tag) {
                    out.push(self.wrap(mark.tag(), &element.children)?);
                } else {
                    out.extend(self.all(&element.children)?);
                }
            }
            // definitions are resolved up front; footnotes and front matter
            // have no flat form
            _ => {}
        }
        Ok(())
    }

    fn anchor(&self, children: &[Node], url: &str, title: Option<&str>) -> Result<Element> {
        let mut anchor = Element::with_children("a", self.all(children)?).with_attr("href", url);
        if let Some(title) = title {
            anchor.attributes.set("title", title);
        }
        Ok(anchor)
    }

    fn list(&self, list: &List) -> Result<Element> {
        let tag = if list.ordered { "ol" } else { "ul" };
        let marker = spread::list_marker(list, self.spread_mode);
        let mut element = Element::new(tag).with_attr("class", marker.class());
        if let Some(start) = list.start.filter(|start| list.ordered && *start != 1) {
            element.attributes.set("start", start.to_string());
        }

        let loose = list.spread
            || list
                .children
                .iter()
                .any(|child| matches!(child, Node::ListItem(item) if item.spread));
        for child in &list.children {
            match child {
                Node::ListItem(item) => element
                    .children
                    .push(tree::Node::Element(self.list_item(item, loose)?)),
                other => self.node(other, &mut element.children)?,
            }
        }
        Ok(element)
    }

    /// Items of a tight list lose their paragraph wrappers
    fn list_item(&self, item: &ListItem, loose: bool) -> Result<Element> {
        let mut element = Element::new("li");
        for child in &item.children {
            match child {
                Node::Paragraph(paragraph) if !loose => {
                    element.children.extend(self.all(&paragraph.children)?)
                }
                other => self.node(other, &mut element.children)?,
            }
        }
        Ok(element)
    }

    fn table(&self, table: &Table) -> Result<Element> {
        let mut element = Element::new("table");
        let headerless = table
            .position
            .as_ref()
            .is_some_and(|position| self.headerless_lines.contains(&position.start.line));
        if headerless {
            element.attributes.set(HEADERLESS_ATTRIBUTE, "");
        }

        let mut rows = table.children.iter().filter_map(|child| match child {
            Node::TableRow(row) => Some(row),
            _ => None,
        });
        if let Some(head) = rows.next() {
            let row = self.table_row(head, "th", &table.align)?;
            element
                .children
                .push(tree::Node::element("thead", vec![tree::Node::Element(row)]));
        }
        let body = rows
            .map(|row| self.table_row(row, "td", &table.align).map(tree::Node::Element))
            .collect::<Result<Vec<_>>>()?;
        if !body.is_empty() {
            element.children.push(tree::Node::element("tbody", body));
        }
        Ok(element)
    }

    fn table_row(&self, row: &TableRow, cell_tag: &str, align: &[AlignKind]) -> Result<Element> {
        let mut element = Element::new("tr");
        for (column, cell) in row.children.iter().enumerate() {
            let children = cell.children().map(Vec::as_slice).unwrap_or_default();
            let mut cell = Element::with_children(cell_tag, self.all(children)?);
            if let Some(align) = align.get(column).copied().and_then(align_name) {
                cell.attributes.set("align", align);
            }
            element.children.push(tree::Node::Element(cell));
        }
        Ok(element)
    }
}

fn align_name(align: AlignKind) -> Option<&'static str> {
    match align {
        AlignKind::Left => Some("left"),
        AlignKind::Right => Some("right"),
        AlignKind::Center => Some("center"),
        AlignKind::None => None,
    }
}

fn image_element(url: &str, alt: &str, title: Option<&str>) -> Element {
    let mut image = Element::new("img").with_attr("src", url).with_attr("alt", alt);
    if let Some(title) = title {
        image.attributes.set("title", title);
    }
    image
}

fn code_block(code: &Code) -> Element {
    let mut inner = Element::with_children("code", vec![tree::Node::text(format!("{}\n", code.value))]);
    if let Some(lang) = &code.lang {
        inner.attributes.set("class", format!("language-{lang}"));
    }
    Element::with_children("pre", vec![tree::Node::Element(inner)])
}
