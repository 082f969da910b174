//! Tag dispatch table
//!
//! Built once per pipeline from the extension toggles. A tag without a
//! handler is unwrapped: its children take its place.

use crate::config::{Extensions, Strikethrough};
use crate::markdown::ext::Mark;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Paragraph,
    Heading(u8),
    List { ordered: bool },
    ListItem,
    Table,
    Emphasis,
    Strong,
    Delete,
    Mark(Mark),
    Break,
    Link,
    Image,
    InlineCode,
    CodeBlock,
    Blockquote,
    ThematicBreak,
    DefinitionList,
    /// `dt` or `dd`
    DefinitionPart,
    InlineMedia,
    /// Media outside the inline-media extension, kept as a link to its source
    MediaLink,
    /// Dropped with its content
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerTable(HashMap<&'static str, Handler>);

impl HandlerTable {
    pub fn resolve(extensions: &Extensions) -> Self {
        let mut table: HashMap<&'static str, Handler> = HashMap::new();
        table.insert("p", Handler::Paragraph);
        for (depth, tag) in ["h1", "h2", "h3", "h4", "h5", "h6"].into_iter().enumerate() {
            table.insert(tag, Handler::Heading(depth as u8 + 1));
        }
        table.insert("ul", Handler::List { ordered: false });
        table.insert("ol", Handler::List { ordered: true });
        table.insert("li", Handler::ListItem);
        table.insert("table", Handler::Table);
        table.insert("em", Handler::Emphasis);
        table.insert("i", Handler::Emphasis);
        table.insert("strong", Handler::Strong);
        table.insert("b", Handler::Strong);
        table.insert("br", Handler::Break);
        table.insert("a", Handler::Link);
        table.insert("img", Handler::Image);
        table.insert("code", Handler::InlineCode);
        table.insert("kbd", Handler::InlineCode);
        table.insert("pre", Handler::CodeBlock);
        table.insert("blockquote", Handler::Blockquote);
        table.insert("hr", Handler::ThematicBreak);
        for tag in ["script", "style", "template", "head", "title", "meta", "link", "noscript"] {
            table.insert(tag, Handler::Drop);
        }

        if extensions.strikethrough != Strikethrough::Off {
            for tag in ["del", "s", "strike"] {
                table.insert(tag, Handler::Delete);
            }
        }

        let marks = [
            (Mark::Underline, extensions.underline),
            (Mark::Superscript, extensions.superscript),
            (Mark::Subscript, extensions.subscript),
        ];
        for (mark, enabled) in marks {
            if enabled {
                table.insert(mark.tag(), Handler::Mark(mark));
            }
        }

        if extensions.definition_lists {
            table.insert("dl", Handler::DefinitionList);
            table.insert("dt", Handler::DefinitionPart);
            table.insert("dd", Handler::DefinitionPart);
        } else {
            table.insert("dt", Handler::Paragraph);
            table.insert("dd", Handler::Paragraph);
        }

        let media = if extensions.inline_media {
            Handler::InlineMedia
        } else {
            Handler::MediaLink
        };
        table.insert("audio", media);
        table.insert("video", media);

        Self(table)
    }

    pub fn get(&self, tag: &str) -> Option<Handler> {
        self.0.get(tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = HandlerTable::resolve(&Extensions::default());
        assert_eq!(table.get("b"), Some(Handler::Strong));
        assert_eq!(table.get("h3"), Some(Handler::Heading(3)));
        assert_eq!(table.get("u"), Some(Handler::Mark(Mark::Underline)));
        assert_eq!(table.get("dd"), Some(Handler::DefinitionPart));
        assert_eq!(table.get("video"), Some(Handler::InlineMedia));
        assert_eq!(table.get("span"), None);
    }

    #[test]
    fn test_disabled_extensions_fall_back() {
        let extensions = Extensions {
            definition_lists: false,
            inline_media: false,
            underline: false,
            strikethrough: Strikethrough::Off,
            ..Extensions::default()
        };
        let table = HandlerTable::resolve(&extensions);
        assert_eq!(table.get("u"), None);
        assert_eq!(table.get("del"), None);
        assert_eq!(table.get("dl"), None);
        assert_eq!(table.get("dt"), Some(Handler::Paragraph));
        assert_eq!(table.get("audio"), Some(Handler::MediaLink));
    }
}
