//! Structural mdast rendering
//!
//! Renders the structured model to Markdown by walking its structure.
//! Block renderers return lines; the [`Compositor`] decides how blocks are
//! separated, so no renderer ever emits inter-block newlines itself.
//!
//! # Architecture
//!
//! - **MdRender trait**: structural rendering abstraction
//! - **RenderResult**: inline text or block lines, kept apart until composition
//! - **MarkdownRenderer**: flow dispatch plus the block, inline, list, table
//!   and definition-list renderers
//! - **Compositor**: blank-line policy between sibling blocks

mod block;
mod compositor;
mod deflist;
mod escape;
mod inline;
mod list;
mod table;

pub use compositor::{Compositor, FlowParent};
pub use escape::{EscapeRules, Surroundings, escape_text};

use crate::config::{HardBreak, Options, Strikethrough, TableStyle};
use crate::markdown::ext::Mark;
use markdown::mdast::Node;
use thiserror::Error;

/// Rendering output
///
/// Inline content never contains block separators; block content is a list
/// of lines the caller indents and separates.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderResult {
    Inline(String),
    Block(Vec<String>),
}

impl RenderResult {
    pub fn into_markdown(self) -> String {
        match self {
            RenderResult::Inline(text) => text,
            RenderResult::Block(lines) => lines.join("\n"),
        }
    }
}

/// Trait for structural mdast rendering
pub trait MdRender {
    /// # Errors
    ///
    /// Returns `RenderError` when the node cannot be expressed in Markdown.
    fn render(&self, node: &Node) -> Result<RenderResult, RenderError>;
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// Node type with no Markdown form
    #[error("Unsupported node type: {0}")]
    UnsupportedNode(String),

    /// Table without rows
    #[error("Invalid table structure: {0}")]
    InvalidTable(String),
}

/// Output dialect settings resolved from [`Options`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub bullet: char,
    pub hard_break: HardBreak,
    pub table_style: TableStyle,
    pub definition_lists: bool,
    pub inline_media: bool,
    pub marks: Vec<Mark>,
    pub strikethrough: Strikethrough,
}

impl RenderOptions {
    pub fn resolve(options: &Options, marks: &[Mark]) -> Self {
        Self {
            bullet: options.markdown.bullet,
            hard_break: options.markdown.hard_break,
            table_style: options.extensions.tables,
            definition_lists: options.extensions.definition_lists,
            inline_media: options.extensions.inline_media,
            marks: marks.to_vec(),
            strikethrough: options.extensions.strikethrough,
        }
    }

    /// Bullet used by a list directly following another list
    pub fn alternate_bullet(&self) -> char {
        if self.bullet == '*' { '-' } else { '*' }
    }

    fn escape_rules(&self) -> EscapeRules {
        EscapeRules {
            mark_delimiters: self.marks.iter().map(|mark| mark.delimiter()).collect(),
            strikethrough: self.strikethrough != Strikethrough::Off,
            single_tilde: self.strikethrough == Strikethrough::Single,
            definition_lists: self.definition_lists,
            inline_media: self.inline_media,
        }
    }
}

/// Renders mdast to Markdown in the configured dialect
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: RenderOptions,
    rules: EscapeRules,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        let rules = options.escape_rules();
        Self { options, rules }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders a whole document; the result has no trailing newline
    pub fn render_document(&self, root: &Node) -> Result<String, RenderError> {
        Ok(self.render(root)?.into_markdown())
    }
}

impl MdRender for MarkdownRenderer {
    fn render(&self, node: &Node) -> Result<RenderResult, RenderError> {
        match node {
            Node::Root(root) => Ok(RenderResult::Block(
                self.flow(&root.children, FlowParent::Document)?,
            )),
            node if inline::is_phrasing(node) => Ok(RenderResult::Inline(
                self.inline(std::slice::from_ref(node), inline::Scope::BLOCK)?,
            )),
            node => Ok(RenderResult::Block(self.block(node, false)?)),
        }
    }
}

#[cfg(test)]
mod tests;
