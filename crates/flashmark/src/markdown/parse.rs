//! Markdown front end: source text to the structured model

use super::{attention, deflist, directive, escapes, headerless};
use crate::config::pipeline::{MarkdownPass, Pipeline};
use crate::error::{FlashmarkError, Result};
use markdown::mdast::Node;
use std::collections::HashSet;

/// Parsed structured model plus the start lines of headerless tables
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMarkdown {
    pub root: Node,
    pub headerless_lines: HashSet<usize>,
}

/// Parses Markdown and runs the pipeline's extension passes
///
/// # Errors
///
/// Returns `MarkdownParse` when the parser rejects the input.
pub fn parse_markdown(source: &str, pipeline: &Pipeline) -> Result<ParsedMarkdown> {
    let protected = escapes::protect(source, &pipeline.escaped_delimiters, pipeline.inline_media);
    let (source, headerless_lines) = if pipeline.headerless_tables {
        let tables = headerless::swap_headerless(&protected);
        (tables.source, tables.lines)
    } else {
        (protected.into_owned(), HashSet::new())
    };

    let mut root = markdown::to_mdast(&source, &pipeline.parse_options())
        .map_err(|e| FlashmarkError::MarkdownParse(e.to_string()))?;

    for pass in &pipeline.markdown_passes {
        tracing::trace!(?pass, "running markdown pass");
        match pass {
            MarkdownPass::MergeText => merge_text(&mut root),
            MarkdownPass::Directives => directive::expand(&mut root),
            MarkdownPass::Attention(mark) => attention::apply(&mut root, *mark),
            MarkdownPass::DefinitionLists => deflist::build(&mut root),
            MarkdownPass::RestoreEscapes => escapes::restore(&mut root),
        }
    }

    Ok(ParsedMarkdown {
        root,
        headerless_lines,
    })
}

/// Joins adjacent text siblings everywhere in the tree
fn merge_text(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    if children
        .windows(2)
        .any(|pair| matches!(pair, [Node::Text(_), Node::Text(_)]))
    {
        let mut merged: Vec<Node> = Vec::with_capacity(children.len());
        for child in std::mem::take(children) {
            match (merged.last_mut(), child) {
                (Some(Node::Text(previous)), Node::Text(text)) => {
                    previous.value.push_str(&text.value)
                }
                (_, child) => merged.push(child),
            }
        }
        *children = merged;
    }
    for child in children.iter_mut() {
        merge_text(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::markdown::ext::element_name;

    fn parse(source: &str) -> Node {
        let pipeline = Pipeline::resolve(&Options::default());
        parse_markdown(source, &pipeline).unwrap().root
    }

    fn first_block(root: &Node) -> &Node {
        &root.children().unwrap()[0]
    }

    /// Text values of `node`'s children, ignoring source positions
    fn text_values(node: &Node) -> Vec<&str> {
        node.children()
            .unwrap()
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.value.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_escaped_delimiter_stays_text() {
        let root = parse(r"1 \=x\= 2");
        let paragraph = first_block(&root);
        assert_eq!(paragraph.children().unwrap().len(), 1);
        assert_eq!(text_values(paragraph), vec!["1 =x= 2"]);
    }

    #[test]
    fn test_underline_with_nested_strong() {
        let root = parse("=underlined **bold** text=");
        let paragraph = first_block(&root);
        assert_eq!(element_name(&paragraph.children().unwrap()[0]), Some("u"));
    }

    #[test]
    fn test_double_tilde_is_strikethrough() {
        let root = parse("~~del~~ and ~sub~");
        let children = first_block(&root).children().unwrap();
        assert!(matches!(children[0], Node::Delete(_)));
        assert_eq!(element_name(&children[2]), Some("sub"));
    }

    #[test]
    fn test_headerless_table_lines_recorded() {
        let pipeline = Pipeline::resolve(&Options::default());
        let parsed = parse_markdown("Text\n\n| --- | --- |\n| a | b |", &pipeline).unwrap();
        assert_eq!(parsed.headerless_lines, HashSet::from([3]));
        assert!(matches!(parsed.root.children().unwrap()[1], Node::Table(_)));
    }

    #[test]
    fn test_escaped_colon_is_not_definition() {
        let root = parse("Term\n\\: not a definition");
        assert!(matches!(first_block(&root), Node::Paragraph(_)));
    }

    #[test]
    fn test_html_is_text() {
        let root = parse("a <b>c</b>");
        let paragraph = first_block(&root);
        assert_eq!(paragraph.children().unwrap().len(), 1);
        assert_eq!(text_values(paragraph), vec!["a <b>c</b>"]);
    }
}
