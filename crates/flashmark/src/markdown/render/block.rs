//! Flow content: dispatch, paragraphs, headings, code, quotes

use super::compositor::RenderedBlock;
use super::inline::{self, Scope};
use super::{Compositor, FlowParent, MarkdownRenderer, RenderError};
use markdown::mdast::{Code, Heading, Node};

impl MarkdownRenderer {
    /// Renders sibling flow nodes and composes them for `parent`
    pub(super) fn flow(&self, children: &[Node], parent: FlowParent) -> Result<Vec<String>, RenderError> {
        let mut blocks = Vec::with_capacity(children.len());
        let mut previous_list: Option<(bool, bool)> = None;

        for child in children {
            let alternate = match (child, previous_list) {
                (Node::List(list), Some((ordered, alternate))) if list.ordered == ordered => !alternate,
                _ => false,
            };
            let lines = self.block(child, alternate)?;
            previous_list = match child {
                Node::List(list) => Some((list.ordered, alternate)),
                _ => None,
            };
            if lines.is_empty() {
                continue;
            }
            blocks.push(RenderedBlock {
                paragraph: matches!(child, Node::Paragraph(_)),
                list: matches!(child, Node::List(_)),
                lines,
            });
        }
        Ok(Compositor::new(parent).compose(blocks))
    }

    /// Renders one flow node; `alternate` switches list markers
    pub(super) fn block(&self, node: &Node, alternate: bool) -> Result<Vec<String>, RenderError> {
        match node {
            Node::Paragraph(paragraph) => Ok(lines(&self.inline(&paragraph.children, Scope::BLOCK)?)),
            Node::Heading(heading) => self.heading(heading),
            Node::ThematicBreak(_) => Ok(vec!["***".to_string()]),
            Node::Code(code) => Ok(fenced_code(code)),
            Node::Blockquote(quote) => Ok(self
                .flow(&quote.children, FlowParent::Blockquote)?
                .into_iter()
                .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
                .collect()),
            Node::List(list) => self.list(list, alternate),
            Node::Table(table) => self.table(table),
            Node::Html(html) => Ok(lines(&html.value)),
            Node::MdxJsxFlowElement(element) if element.name.as_deref() == Some("dl") => {
                self.definition_list(&element.children)
            }
            Node::MdxJsxFlowElement(element) if element.children.iter().all(inline::is_phrasing) => {
                Ok(lines(&self.inline(&element.children, Scope::BLOCK)?))
            }
            Node::MdxJsxFlowElement(element) => self.flow(&element.children, FlowParent::Document),
            node if inline::is_phrasing(node) => {
                Ok(lines(&self.inline(std::slice::from_ref(node), Scope::BLOCK)?))
            }
            other => Err(RenderError::UnsupportedNode(inline::kind(other))),
        }
    }

    fn heading(&self, heading: &Heading) -> Result<Vec<String>, RenderError> {
        let marker = "#".repeat(usize::from(heading.depth.clamp(1, 6)));
        let content = self.inline(&heading.children, Scope::HEADING)?;
        if content.is_empty() {
            Ok(vec![marker])
        } else {
            Ok(vec![format!("{marker} {content}")])
        }
    }
}

/// Splits rendered text into lines; empty text is no block at all
pub(super) fn lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}

fn fenced_code(code: &Code) -> Vec<String> {
    let longest = longest_run(&code.value, '`');
    let fence = "`".repeat(longest.max(2) + 1);
    let mut info = code.lang.clone().unwrap_or_default();
    if let Some(meta) = &code.meta {
        info.push(' ');
        info.push_str(meta);
    }

    let mut lines = vec![format!("{fence}{info}")];
    if !code.value.is_empty() {
        lines.extend(code.value.split('\n').map(str::to_string));
    }
    lines.push(fence);
    lines
}

/// Length of the longest run of `c` in `value`
pub(super) fn longest_run(value: &str, c: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for next in value.chars() {
        if next == c {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
