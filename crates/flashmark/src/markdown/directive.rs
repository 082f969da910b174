//! Text directives `:audio[label]{attributes}` and `:video[...]`

use super::ext::Directive;
use markdown::mdast::Node;
use regex::Regex;
use std::sync::LazyLock;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":(audio|video)\[([^\]\n]*)\](?:\{([^}\n]*)\})?").expect("directive regex is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w:.-]*)(?:=(?:"([^"]*)"|'([^']*)'|([^\s"'=]+)))?"#)
        .expect("directive attribute regex is valid")
});

/// Splits text nodes around directives
pub fn expand(node: &mut Node) {
    if matches!(node, Node::Code(_) | Node::InlineCode(_)) {
        return;
    }
    let Some(children) = node.children_mut() else {
        return;
    };
    if children.iter().any(|child| matches!(child, Node::Text(text) if DIRECTIVE.is_match(&text.value))) {
        let expanded = std::mem::take(children)
            .into_iter()
            .flat_map(|child| match child {
                Node::Text(text) => split_text(&text.value),
                other => vec![other],
            })
            .collect();
        *children = expanded;
    }
    for child in children.iter_mut() {
        expand(child);
    }
}

fn split_text(value: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;
    for captures in DIRECTIVE.captures_iter(value) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if whole.start() > last {
            nodes.push(super::ext::text(&value[last..whole.start()]));
        }
        let directive = Directive {
            name: captures[1].to_string(),
            label: captures[2].to_string(),
            attributes: captures
                .get(3)
                .map(|attributes| parse_attributes(attributes.as_str()))
                .unwrap_or_default(),
        };
        nodes.push(directive.into_node());
        last = whole.end();
    }
    if last < value.len() {
        nodes.push(super::ext::text(&value[last..]));
    }
    nodes
}

/// Parses `a b key="v" k2='v' k3=v` into ordered pairs
pub fn parse_attributes(source: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(source)
        .map(|captures| {
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .or_else(|| captures.get(4))
                .map(|value| value.as_str().to_string())
                .unwrap_or_default();
            (captures[1].to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ext::{element_name, text};
    use markdown::mdast::Paragraph;

    fn paragraph(value: &str) -> Node {
        Node::Paragraph(Paragraph {
            children: vec![text(value)],
            position: None,
        })
    }

    #[test]
    fn test_expand_inline_directive() {
        let mut node = paragraph("Clip: :video[_x.webm]{loop auto_front} end");
        expand(&mut node);
        let children = node.children().unwrap();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], text("Clip: "));
        assert_eq!(element_name(&children[1]), Some("video"));
        assert_eq!(children[2], text(" end"));

        let Node::MdxJsxTextElement(element) = &children[1] else {
            panic!("Expected directive element");
        };
        let directive = Directive::from_element(element).unwrap();
        assert_eq!(directive.label, "_x.webm");
        assert_eq!(
            directive.attributes,
            vec![
                ("loop".to_string(), String::new()),
                ("auto_front".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_directive_without_attributes() {
        let mut node = paragraph(":audio[_a.mp3]");
        expand(&mut node);
        assert_eq!(node.children().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_directive_stays_text() {
        let mut node = paragraph(":image[_x.png]");
        expand(&mut node);
        assert_eq!(node.children().unwrap(), &vec![text(":image[_x.png]")]);
    }

    #[test]
    fn test_parse_attribute_values() {
        assert_eq!(
            parse_attributes(r#"height=120 title="a b" alt='c'"#),
            vec![
                ("height".to_string(), "120".to_string()),
                ("title".to_string(), "a b".to_string()),
                ("alt".to_string(), "c".to_string()),
            ]
        );
    }
}
