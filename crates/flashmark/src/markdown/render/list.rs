//! Lists
//!
//! Item content is indented by the marker width. Items are separated by a
//! blank line when the list is spread; blocks inside an item follow the
//! item's own spread.

use super::compositor::RenderedBlock;
use super::{Compositor, FlowParent, MarkdownRenderer, RenderError};
use markdown::mdast::{List, Node};

impl MarkdownRenderer {
    pub(super) fn list(&self, list: &List, alternate: bool) -> Result<Vec<String>, RenderError> {
        let bullet = if alternate {
            self.options.alternate_bullet()
        } else {
            self.options.bullet
        };
        let delimiter = if alternate { ')' } else { '.' };
        let start = list.start.unwrap_or(1);

        let mut items = Vec::with_capacity(list.children.len());
        for (index, child) in list.children.iter().enumerate() {
            let marker = if list.ordered {
                let number = u32::try_from(index).map_or(start, |offset| start.saturating_add(offset));
                format!("{number}{delimiter}")
            } else {
                bullet.to_string()
            };
            let content = match child {
                Node::ListItem(item) => self.flow(&item.children, FlowParent::ListItem { spread: item.spread })?,
                other => self.block(other, false)?,
            };
            items.push(RenderedBlock {
                paragraph: false,
                list: false,
                lines: indent_item(&marker, content),
            });
        }
        Ok(Compositor::new(FlowParent::List { spread: list.spread }).compose(items))
    }
}

/// Prefixes the first line with the marker and indents the rest
fn indent_item(marker: &str, content: Vec<String>) -> Vec<String> {
    if content.is_empty() {
        return vec![marker.to_string()];
    }
    let indent = " ".repeat(marker.chars().count() + 1);
    content
        .into_iter()
        .enumerate()
        .map(|(index, line)| match (index, line.is_empty()) {
            (0, _) => format!("{marker} {line}"),
            (_, true) => line,
            (_, false) => format!("{indent}{line}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_item_continuation() {
        let lines = indent_item(
            "10.",
            vec!["One".to_string(), String::new(), "- Alpha".to_string()],
        );
        assert_eq!(lines, vec!["10. One", "", "    - Alpha"]);
    }

    #[test]
    fn test_empty_item_is_bare_marker() {
        assert_eq!(indent_item("-", Vec::new()), vec!["-"]);
    }
}
