//! Conversion entry points

use crate::cloze;
use crate::config::{Options, Pipeline};
use crate::error::Result;
use crate::markdown::parse_markdown;
use crate::markdown::render::MarkdownRenderer;
use crate::mdast_to_tree::mdast_to_tree;
use crate::normalize::{normalize_html, normalize_markdown};
use crate::table_newline::unescape_tables;
use crate::tree::{parse_html, to_html};
use crate::tree_to_mdast::tree_to_mdast;

/// Converts between the editor's flat HTML and extended Markdown
///
/// Options are resolved once, on construction. A converter holds no
/// mutable state, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Converter {
    options: Options,
    pipeline: Pipeline,
    renderer: MarkdownRenderer,
}

impl Converter {
    /// # Errors
    ///
    /// Returns `ConfigInvalidValue` when the options fail validation.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        let pipeline = Pipeline::resolve(&options);
        let renderer = MarkdownRenderer::new(pipeline.render.clone());
        Ok(Self {
            options,
            pipeline,
            renderer,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Flat HTML to Markdown, plus the highest cloze ordinal in the result
    ///
    /// # Errors
    ///
    /// Returns `HtmlParse` or `Render` when a stage fails.
    pub fn to_structured(&self, html: &str) -> Result<(String, u32)> {
        if html.is_empty() {
            return Ok((String::new(), 0));
        }
        let mut root = parse_html(html)?;
        normalize_html(&mut root, self.pipeline.context());
        let mdast = tree_to_mdast(&root, &self.pipeline);
        let markdown = self.renderer.render_document(&mdast)?;
        let ordinal = cloze::max_ordinal(&markdown);
        tracing::debug!(bytes = markdown.len(), cloze = ordinal, "converted html to markdown");
        Ok((markdown, ordinal))
    }

    /// Markdown to flat HTML
    ///
    /// # Errors
    ///
    /// Returns `MarkdownParse` when parsing fails and `InlineMediaLabel`
    /// for a media directive whose label is not a media filename.
    pub fn to_flat(&self, markdown: &str) -> Result<String> {
        if markdown.is_empty() {
            return Ok(String::new());
        }
        let parsed = parse_markdown(markdown, &self.pipeline)?;
        let mut root = mdast_to_tree(&parsed, &self.pipeline)?;
        normalize_markdown(&mut root, self.pipeline.context());
        unescape_tables(&mut root, self.pipeline.context());
        let html = to_html(&root);
        tracing::debug!(bytes = html.len(), "converted markdown to html");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlashmarkError;

    #[test]
    fn test_empty_input() {
        let converter = Converter::new(Options::default()).unwrap();
        assert_eq!(converter.to_structured("").unwrap(), (String::new(), 0));
        assert_eq!(converter.to_flat("").unwrap(), "");
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let mut options = Options::default();
        options.extensions.table_newline = "ab".to_string();
        let error = Converter::new(options).unwrap_err();
        assert!(matches!(error, FlashmarkError::ConfigInvalidValue { .. }));
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }

    #[test]
    fn test_cloze_ordinal_is_reported() {
        let converter = Converter::new(Options::default()).unwrap();
        let (markdown, ordinal) = converter.to_structured("{{c2::a}} {{c7::b}}").unwrap();
        assert_eq!(markdown, "{{c2::a}} {{c7::b}}");
        assert_eq!(ordinal, 7);
    }
}
