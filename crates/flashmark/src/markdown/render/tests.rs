//! Renderer tests over parsed Markdown
//!
//! Canonical Markdown parsed with the default pipeline must render back
//! unchanged.

use super::*;
use crate::config::Pipeline;
use crate::markdown::parse_markdown;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn rerender(source: &str, options: Options) -> String {
    let pipeline = Pipeline::resolve(&options);
    let parsed = parse_markdown(source, &pipeline).unwrap();
    MarkdownRenderer::new(pipeline.render.clone())
        .render_document(&parsed.root)
        .unwrap()
}

#[rstest]
#[case::paragraphs("A paragraph\n\nA second paragraph")]
#[case::heading("## Ok\n\nParagraph")]
#[case::hard_break("Breaking newline ->  \n<-")]
#[case::nested_list("Nested list:\n\n- One\n  - Alpha\n  - Bravo\n- Two\n- Three")]
#[case::ordered_list("1. One\n2. Two")]
#[case::loose_cloze_list("- One {{c3::\n\n  - Alpha\n  - Bravo\n\n  }}\n\n- Two\n\n- Three")]
#[case::table("| GFM   | Style |\n| :---- | :---: |\n| table |  with |\n| cells |  rows |")]
#[case::definition_list("Term\n:   And its **bold** defintion\n\nSecond\n:   Term should be fine")]
#[case::marks("=u= ^s^ ~b~ ~~d~~ *i* **b**")]
#[case::escaped_ordinal(r"1\. not a list")]
#[case::fenced_code("```rust\nlet x = 1;\n```")]
#[case::quote("> quoted\n>\n> twice")]
#[case::link("[site](https://example.com \"Title\") and <https://example.com>")]
#[case::break_at_line_start("a  \n\\\nb")]
#[case::backslash_before_markers(r"\\*x* and \\`c`")]
fn test_canonical_markdown_is_stable(#[case] source: &str) {
    assert_eq!(rerender(source, Options::default()), source);
}

#[test]
fn test_adjacent_lists_alternate_bullets() {
    assert_eq!(rerender("- a\n\n* b", Options::default()), "- a\n\n* b");
}

#[test]
fn test_escape_hard_break_style() {
    let mut options = Options::default();
    options.markdown.hard_break = HardBreak::Escape;
    assert_eq!(rerender("a  \nb", options), "a\\\nb");
}

#[test]
fn test_custom_bullet() {
    let mut options = Options::default();
    options.markdown.bullet = '*';
    assert_eq!(rerender("- a\n- b", options), "* a\n* b");
}

#[test]
fn test_whitespace_moves_outside_markers() {
    let root = Node::Root(markdown::mdast::Root {
        children: vec![Node::Paragraph(markdown::mdast::Paragraph {
            children: vec![
                crate::markdown::ext::text("a"),
                Node::Strong(markdown::mdast::Strong {
                    children: vec![crate::markdown::ext::text(" bold ")],
                    position: None,
                }),
                crate::markdown::ext::text("b"),
            ],
            position: None,
        })],
        position: None,
    });
    let renderer = MarkdownRenderer::new(Pipeline::resolve(&Options::default()).render);
    assert_eq!(renderer.render_document(&root).unwrap(), "a **bold** b");
}

#[test]
fn test_phrasing_node_renders_inline() {
    let renderer = MarkdownRenderer::new(Pipeline::resolve(&Options::default()).render);
    let result = renderer.render(&crate::markdown::ext::text("*")).unwrap();
    assert_eq!(result, RenderResult::Inline(r"\*".to_string()));
}

#[test]
fn test_table_without_rows_is_error() {
    let renderer = MarkdownRenderer::new(Pipeline::resolve(&Options::default()).render);
    let table = Node::Table(markdown::mdast::Table {
        children: Vec::new(),
        position: None,
        align: Vec::new(),
    });
    assert!(matches!(
        renderer.render(&table),
        Err(RenderError::InvalidTable(_))
    ));
}
