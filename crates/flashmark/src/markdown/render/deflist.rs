//! Definition lists: `Term` lines followed by `:   definition` lines

use super::block::lines;
use super::inline::{Scope, is_phrasing};
use super::{FlowParent, MarkdownRenderer, RenderError};
use crate::markdown::ext;
use markdown::mdast::Node;

const DEFINITION_MARKER: &str = ":   ";
const DEFINITION_INDENT: &str = "    ";

impl MarkdownRenderer {
    pub(super) fn definition_list(&self, children: &[Node]) -> Result<Vec<String>, RenderError> {
        let mut out = Vec::new();
        let mut after_definition = false;

        for child in children {
            let content = child.children().map(Vec::as_slice).unwrap_or_default();
            match ext::element_name(child) {
                Some("dt") => {
                    if after_definition {
                        out.push(String::new());
                    }
                    out.push(self.term(content)?);
                    after_definition = false;
                }
                Some("dd") => {
                    let definition = if content.iter().all(is_phrasing) {
                        lines(&self.inline(content, Scope::BLOCK)?)
                    } else {
                        self.flow(content, FlowParent::Definition)?
                    };
                    if definition.is_empty() {
                        out.push(DEFINITION_MARKER.trim_end().to_string());
                    }
                    for (index, line) in definition.into_iter().enumerate() {
                        out.push(match (index, line.is_empty()) {
                            (0, _) => format!("{DEFINITION_MARKER}{line}"),
                            (_, true) => line,
                            (_, false) => format!("{DEFINITION_INDENT}{line}"),
                        });
                    }
                    after_definition = true;
                }
                _ => {}
            }
        }
        Ok(out)
    }

    /// A term is a single line
    fn term(&self, content: &[Node]) -> Result<String, RenderError> {
        if content.iter().all(is_phrasing) {
            return self.inline(content, Scope::HEADING);
        }
        let lines = self.flow(content, FlowParent::Document)?;
        Ok(lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" "))
    }
}
