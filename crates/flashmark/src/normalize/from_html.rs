//! Html Normalizer: flat dialect to block structure
//!
//! Single depth-first pass. Per element it buffers phrasing children,
//! counts consecutive breaks, and turns a run of two or more breaks into a
//! paragraph boundary. Lists the host editor placed next to their parent
//! item are moved inside it.

use super::rename_tag;
use crate::context::Context;
use crate::table_newline::TableNewline;
use crate::tree::{Element, Node, is_phrasing_tag};

/// Mutates a freshly parsed flat-dialect tree in place
pub fn normalize_html(root: &mut Element, context: Context) {
    tracing::debug!(nodes = root.node_count(), "normalizing flat html tree");
    mutate(root, context);
}

/// Flow state of the element being rebuilt
struct Flow {
    result: Vec<Node>,
    /// Pending phrasing run
    paragraph: Vec<Node>,
    /// Consecutive breaks at the end of the pending run
    breaks: usize,
    /// Enclosing element only holds phrasing content
    phrasing_parent: bool,
    context: Context,
}

impl Flow {
    fn new(element: &Element, context: Context) -> Self {
        Self {
            result: Vec::new(),
            paragraph: Vec::new(),
            breaks: 0,
            phrasing_parent: is_phrasing_tag(&element.tag)
                || matches!(element.tag.as_str(), "p" | "pre"),
            context,
        }
    }

    fn last_is_list(&self) -> bool {
        matches!(self.result.last(), Some(Node::Element(element)) if element.is_list())
    }

    /// Moves the pending run to the result, wrapped in `p` when required
    ///
    /// Inside lists the run is only wrapped after a blank-line equivalent
    /// or when it trails a nested list in the same item. Trailing breaks
    /// are dropped, except for an unwrapped run that more phrasing content
    /// continues: there they are the only separator left.
    fn flush(&mut self, continued: bool) {
        if self.paragraph.is_empty() {
            return;
        }
        let wrap = !self.phrasing_parent
            && !self.context.forbids_paragraphs()
            && (!self.context.in_list() || self.breaks > 1 || self.last_is_list());

        let mut run = std::mem::take(&mut self.paragraph);
        if wrap || !continued {
            run.truncate(run.len().saturating_sub(self.breaks));
        }

        if !run.is_empty() {
            if wrap {
                self.result.push(Node::element("p", run));
            } else {
                self.result.extend(run);
            }
        }
        self.breaks = 0;
    }

    /// Appends a flow child, repairing lists placed beside their item
    fn push_flow(&mut self, element: Element) {
        if element.is_list() {
            if let Some(Node::Element(item)) = self.result.last_mut() {
                if item.is("li") {
                    tracing::trace!(list = %element.tag, "moving nested list into preceding item");
                    item.children.push(Node::Element(element));
                    return;
                }
            }
        }
        self.result.push(Node::Element(element));
    }
}

fn mutate(element: &mut Element, context: Context) {
    if element.children.is_empty() {
        return;
    }
    let context = context.enter(&element.tag);
    let codec = context.table_sentinel().map(TableNewline::new);
    let mut flow = Flow::new(element, context);

    for child in std::mem::take(&mut element.children) {
        // Pretty-printing newlines between tags
        if matches!(&child, Node::Text(value) if value == "\n") {
            continue;
        }

        if !child.is_phrasing() {
            flow.flush(false);
            if let Node::Element(mut block) = child {
                mutate(&mut block, context);
                flow.push_flow(block);
            }
            continue;
        }

        if child.is_element("br") {
            match codec {
                Some(codec) => flow.paragraph.push(codec.encode_break()),
                None => {
                    flow.paragraph.push(child);
                    flow.breaks += 1;
                }
            }
            continue;
        }

        if flow.breaks > 1 {
            flow.flush(true);
        }
        flow.breaks = 0;

        match child {
            Node::Text(value) => {
                let value = match codec {
                    Some(codec) if !codec.is_separator(&value) => {
                        codec.escape_literals(&value).into_owned()
                    }
                    _ => value,
                };
                flow.paragraph.push(Node::Text(value));
            }
            Node::Element(mut inline) => {
                rename_tag(&mut inline, &[("i", "em"), ("b", "strong")]);
                mutate(&mut inline, context);
                flow.paragraph.push(Node::Element(inline));
            }
        }
    }
    flow.flush(false);

    element.children = flow.result;
}
