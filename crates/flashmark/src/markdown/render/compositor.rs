//! Compositor: separates rendered sibling blocks
//!
//! Blocks arrive as line lists. Whether siblings are separated by a blank
//! line depends only on the parent and the sibling kinds.

/// Container whose children are being composed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowParent {
    Document,
    Blockquote,
    /// Items of a list
    List { spread: bool },
    /// Content of one list item
    ListItem { spread: bool },
    /// Block content of a definition
    Definition,
}

/// One rendered block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub paragraph: bool,
    pub list: bool,
    pub lines: Vec<String>,
}

pub struct Compositor {
    parent: FlowParent,
}

impl Compositor {
    pub fn new(parent: FlowParent) -> Self {
        Self { parent }
    }

    /// Whether a blank line separates `left` from `right`
    pub fn separated(&self, left: &RenderedBlock, right: &RenderedBlock) -> bool {
        match self.parent {
            FlowParent::List { spread } => spread,
            // a paragraph directly under a nested list would continue its
            // last item lazily
            FlowParent::ListItem { spread } => {
                spread || (left.paragraph && right.paragraph) || (left.list && right.paragraph)
            }
            FlowParent::Document | FlowParent::Blockquote | FlowParent::Definition => true,
        }
    }

    pub fn compose(&self, blocks: Vec<RenderedBlock>) -> Vec<String> {
        let mut lines = Vec::new();
        let mut previous: Option<RenderedBlock> = None;
        for block in blocks {
            if let Some(left) = &previous {
                if self.separated(left, &block) {
                    lines.push(String::new());
                }
            }
            lines.extend(block.lines.iter().cloned());
            previous = Some(block);
        }
        lines
    }
}
