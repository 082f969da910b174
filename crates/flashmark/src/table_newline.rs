//! Table-cell line break codec
//!
//! GFM table cells cannot hold line breaks, so inside tables a break
//! element travels as a sentinel character. A sentinel typed by the author
//! is kept apart from a separator by a preceding backslash.

use crate::context::Context;
use crate::tree::{Element, Node};
use std::borrow::Cow;

pub const ESCAPE: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableNewline {
    sentinel: char,
}

impl TableNewline {
    pub fn new(sentinel: char) -> Self {
        Self { sentinel }
    }

    pub fn sentinel(&self) -> char {
        self.sentinel
    }

    /// Text node standing in for one break element
    pub fn encode_break(&self) -> Node {
        Node::Text(self.sentinel.to_string())
    }

    /// True for a text node produced by [`Self::encode_break`]
    pub fn is_separator(&self, value: &str) -> bool {
        let mut chars = value.chars();
        chars.next() == Some(self.sentinel) && chars.next().is_none()
    }

    /// Escapes sentinels that are not already escaped
    pub fn escape_literals<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.unescaped_positions(value).next().is_none() {
            return Cow::Borrowed(value);
        }
        let mut out = String::with_capacity(value.len() + 2);
        let mut previous = None;
        for c in value.chars() {
            if c == self.sentinel && previous != Some(ESCAPE) {
                out.push(ESCAPE);
            }
            out.push(c);
            previous = Some(c);
        }
        Cow::Owned(out)
    }

    /// Drops the escape in front of literal sentinels
    pub fn unescape_literals<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let escaped = format!("{ESCAPE}{}", self.sentinel);
        if value.contains(&escaped) {
            Cow::Owned(value.replace(&escaped, &self.sentinel.to_string()))
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Splits text on unescaped sentinels, one break element per sentinel
    ///
    /// Escaped sentinels stay verbatim, escape included. Empty segments
    /// are not emitted.
    pub fn decode(&self, value: &str) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut start = 0;
        for index in self.unescaped_positions(value) {
            if index > start {
                nodes.push(Node::text(&value[start..index]));
            }
            nodes.push(Node::element("br", vec![]));
            start = index + self.sentinel.len_utf8();
        }
        if start < value.len() {
            nodes.push(Node::text(&value[start..]));
        }
        nodes
    }

    /// Byte offsets of sentinels not preceded by the escape
    fn unescaped_positions<'a>(&self, value: &'a str) -> impl Iterator<Item = usize> + 'a {
        let sentinel = self.sentinel;
        let mut previous = None;
        value.char_indices().filter_map(move |(index, c)| {
            let hit = c == sentinel && previous != Some(ESCAPE);
            previous = Some(c);
            hit.then_some(index)
        })
    }
}

/// Removes literal-sentinel escapes from table text before serialization
///
/// The escape only exists to tell a typed sentinel from a separator in
/// the structured dialect; flat output carries the bare character.
pub fn unescape_tables(element: &mut Element, context: Context) {
    let context = context.enter(&element.tag);
    let codec = context.table_sentinel().map(TableNewline::new);
    for child in &mut element.children {
        match child {
            Node::Text(value) => {
                if let Some(codec) = codec {
                    if let Cow::Owned(unescaped) = codec.unescape_literals(value) {
                        *value = unescaped;
                    }
                }
            }
            Node::Element(child) => unescape_tables(child, context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpreadMode;
    use crate::tree::{ROOT_TAG, parse_html, to_html};

    fn codec() -> TableNewline {
        TableNewline::new('¨')
    }

    #[test]
    fn test_decode_splits_on_sentinel() {
        let nodes = codec().decode("with¨a");
        assert_eq!(
            nodes,
            vec![
                Node::text("with"),
                Node::element("br", vec![]),
                Node::text("a")
            ]
        );
    }

    #[test]
    fn test_decode_counts_every_sentinel() {
        let nodes = codec().decode("¨a¨¨b¨");
        let breaks = nodes.iter().filter(|n| n.is_element("br")).count();
        assert_eq!(breaks, 4);
        assert_eq!(nodes.len(), 6);
    }

    #[test]
    fn test_decode_keeps_escaped_sentinel() {
        let nodes = codec().decode("a\\¨b¨c");
        assert_eq!(
            nodes,
            vec![
                Node::text("a\\¨b"),
                Node::element("br", vec![]),
                Node::text("c")
            ]
        );
    }

    #[test]
    fn test_escape_literals_is_idempotent() {
        let once = codec().escape_literals("a¨b\\¨c").into_owned();
        assert_eq!(once, "a\\¨b\\¨c");
        assert_eq!(codec().escape_literals(&once), once);
        assert!(matches!(codec().escape_literals("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_literals() {
        assert_eq!(codec().unescape_literals("a\\¨b¨c"), "a¨b¨c");
        assert!(matches!(codec().unescape_literals("a¨b"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_tables_only_touches_cells() {
        let mut root = parse_html(
            "a\\¨b<table><tbody><tr><td>lit\\¨x</td></tr></tbody></table>",
        )
        .unwrap();
        assert_eq!(root.tag, ROOT_TAG);
        unescape_tables(&mut root, Context::new(Some('¨'), SpreadMode::Auto));
        assert_eq!(
            to_html(&root),
            "a\\¨b<table><tbody><tr><td>lit¨x</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_separator_detection() {
        assert!(codec().is_separator("¨"));
        assert!(!codec().is_separator("¨¨"));
        assert!(!codec().is_separator("a¨"));
        assert_eq!(codec().encode_break(), Node::text("¨"));
    }
}
