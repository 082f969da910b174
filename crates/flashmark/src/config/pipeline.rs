//! Pipeline resolution
//!
//! Options are turned into concrete parser settings, pass lists and handler
//! tables once, when a converter is built. Conversions only read the
//! resolved pipeline, so toggles are never re-checked per node.

use super::{Options, SpreadMode, Strikethrough, TableStyle};
use crate::context::Context;
use crate::markdown::ext::Mark;
use crate::markdown::render::RenderOptions;
use crate::tree_to_mdast::HandlerTable;
use markdown::{Constructs, ParseOptions};

/// Post-parse pass over the structured model, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownPass {
    MergeText,
    Directives,
    Attention(Mark),
    DefinitionLists,
    RestoreEscapes,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    pub table_style: TableStyle,
    pub strikethrough: Strikethrough,
    /// Repair tables that start with a delimiter row
    pub headerless_tables: bool,
    /// Delimiters whose backslash escapes survive parsing
    pub escaped_delimiters: Vec<char>,
    pub markdown_passes: Vec<MarkdownPass>,
    pub handlers: HandlerTable,
    pub render: RenderOptions,
    pub sentinel: Option<char>,
    pub spread_mode: SpreadMode,
    pub inline_media: bool,
}

impl Pipeline {
    pub fn resolve(options: &Options) -> Self {
        let extensions = &options.extensions;
        let marks: Vec<Mark> = Mark::ALL
            .into_iter()
            .filter(|mark| match mark {
                Mark::Underline => extensions.underline,
                Mark::Superscript => extensions.superscript,
                Mark::Subscript => extensions.subscript,
            })
            .collect();

        let mut escaped_delimiters: Vec<char> = marks.iter().map(|mark| mark.delimiter()).collect();
        if extensions.definition_lists || extensions.inline_media {
            escaped_delimiters.push(':');
        }

        let mut markdown_passes = vec![MarkdownPass::MergeText];
        if extensions.inline_media {
            markdown_passes.push(MarkdownPass::Directives);
        }
        markdown_passes.extend(marks.iter().map(|mark| MarkdownPass::Attention(*mark)));
        if extensions.definition_lists {
            markdown_passes.push(MarkdownPass::DefinitionLists);
        }
        if !escaped_delimiters.is_empty() {
            markdown_passes.push(MarkdownPass::RestoreEscapes);
        }

        let pipeline = Self {
            table_style: extensions.tables,
            strikethrough: extensions.strikethrough,
            headerless_tables: extensions.tables == TableStyle::Extended,
            escaped_delimiters,
            markdown_passes,
            handlers: HandlerTable::resolve(extensions),
            render: RenderOptions::resolve(options, &marks),
            sentinel: options.sentinel(),
            spread_mode: extensions.list_spread,
            inline_media: extensions.inline_media,
        };
        tracing::debug!(passes = ?pipeline.markdown_passes, "resolved conversion pipeline");
        pipeline
    }

    /// Root context for tree passes
    pub fn context(&self) -> Context {
        Context::new(self.sentinel, self.spread_mode)
    }

    /// Parser settings; raw HTML is never recognized
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            constructs: Constructs {
                gfm_table: self.table_style != TableStyle::None,
                gfm_strikethrough: self.strikethrough != Strikethrough::Off,
                html_flow: false,
                html_text: false,
                ..Constructs::default()
            },
            gfm_strikethrough_single_tilde: self.strikethrough == Strikethrough::Single,
            ..ParseOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_passes() {
        let pipeline = Pipeline::resolve(&Options::default());
        assert_eq!(
            pipeline.markdown_passes,
            vec![
                MarkdownPass::MergeText,
                MarkdownPass::Directives,
                MarkdownPass::Attention(Mark::Underline),
                MarkdownPass::Attention(Mark::Superscript),
                MarkdownPass::Attention(Mark::Subscript),
                MarkdownPass::DefinitionLists,
                MarkdownPass::RestoreEscapes,
            ]
        );
        assert!(pipeline.headerless_tables);
        assert_eq!(pipeline.escaped_delimiters, vec!['=', '^', '~', ':']);
    }

    #[test]
    fn test_disabled_extensions_drop_passes() {
        let mut options = Options::default();
        options.extensions.inline_media = false;
        options.extensions.definition_lists = false;
        options.extensions.underline = false;
        options.extensions.superscript = false;
        options.extensions.subscript = false;
        options.extensions.tables = TableStyle::Basic;

        let pipeline = Pipeline::resolve(&options);
        assert_eq!(pipeline.markdown_passes, vec![MarkdownPass::MergeText]);
        assert!(!pipeline.headerless_tables);
        assert!(pipeline.escaped_delimiters.is_empty());
    }

    #[test]
    fn test_parse_options_follow_toggles() {
        let mut options = Options::default();
        options.extensions.tables = TableStyle::None;
        options.extensions.strikethrough = Strikethrough::Single;

        let parse = Pipeline::resolve(&options).parse_options();
        assert!(!parse.constructs.gfm_table);
        assert!(parse.constructs.gfm_strikethrough);
        assert!(parse.gfm_strikethrough_single_tilde);
        assert!(!parse.constructs.html_text);
    }
}
