//! Flat tree to structured model (ascent)
//!
//! Walks a normalized [`Element`] tree and builds mdast. Tags are
//! dispatched through the pipeline's [`HandlerTable`]; unhandled tags are
//! unwrapped so their content survives.

mod builders;
mod handlers;
mod helpers;

pub use handlers::{Handler, HandlerTable};

use crate::config::{Pipeline, SpreadMode};
use crate::tree::{self, Element, is_phrasing_tag};
use markdown::mdast::{Node, Root};

/// Builds the structured model for a normalized tree
pub fn tree_to_mdast(root: &Element, pipeline: &Pipeline) -> Node {
    let converter = TreeConverter {
        handlers: &pipeline.handlers,
        spread_mode: pipeline.spread_mode,
    };
    Node::Root(Root {
        children: converter.flow(&root.children),
        position: None,
    })
}

pub(super) struct TreeConverter<'a> {
    handlers: &'a HandlerTable,
    pub(super) spread_mode: SpreadMode,
}

impl TreeConverter<'_> {
    /// Converts children in a flow container
    pub(super) fn flow(&self, children: &[tree::Node]) -> Vec<Node> {
        helpers::to_flow(self.all(children))
    }

    /// Converts children in a phrasing container
    pub(super) fn phrasing(&self, children: &[tree::Node]) -> Vec<Node> {
        helpers::clean_inline(helpers::flatten_to_phrasing(self.all(children)))
    }

    pub(super) fn all(&self, children: &[tree::Node]) -> Vec<Node> {
        children.iter().flat_map(|child| self.one(child)).collect()
    }

    pub(super) fn one(&self, node: &tree::Node) -> Vec<Node> {
        match node {
            tree::Node::Text(value) => vec![crate::markdown::ext::text(helpers::collapse_whitespace(value))],
            tree::Node::Element(element) => self.element(element),
        }
    }

    fn element(&self, element: &Element) -> Vec<Node> {
        let Some(handler) = self.handlers.get(&element.tag) else {
            return if is_phrasing_tag(&element.tag) {
                self.all(&element.children)
            } else {
                self.flow(&element.children)
            };
        };

        match handler {
            Handler::Paragraph => builders::build_paragraph(self, element).into_iter().collect(),
            Handler::Heading(depth) => vec![builders::build_heading(self, element, depth)],
            Handler::List { ordered } => vec![builders::build_list(self, element, ordered)],
            Handler::ListItem => vec![builders::build_list_item(self, element, None)],
            Handler::Table => builders::build_table(self, element).into_iter().collect(),
            Handler::Emphasis | Handler::Strong | Handler::Delete | Handler::Mark(_) => {
                builders::build_attention(self, element, handler)
            }
            Handler::Break => vec![builders::build_break()],
            Handler::Link => builders::build_link(self, element),
            Handler::Image => vec![builders::build_image(element)],
            Handler::InlineCode => vec![builders::build_inline_code(element)],
            Handler::CodeBlock => vec![builders::build_code_block(element)],
            Handler::Blockquote => vec![builders::build_blockquote(self, element)],
            Handler::ThematicBreak => vec![builders::build_thematic_break()],
            Handler::DefinitionList => vec![builders::build_definition_list(self, element)],
            Handler::DefinitionPart => vec![builders::build_definition_part(self, element)],
            Handler::InlineMedia => builders::build_inline_media(self, element),
            Handler::MediaLink => builders::build_media_link(element).into_iter().collect(),
            Handler::Drop => Vec::new(),
        }
    }
}
