use thiserror::Error;

use crate::markdown::render::RenderError;

#[derive(Error, Debug)]
pub enum FlashmarkError {
    // Parse errors
    #[error("HTML_PARSE_ERROR: {0}")]
    HtmlParse(String),

    #[error("MARKDOWN_PARSE_ERROR: {0}")]
    MarkdownParse(String),

    // Render errors
    #[error("RENDER_ERROR: {0}")]
    Render(#[from] RenderError),

    // Contract violations
    #[error("INLINE_MEDIA_LABEL_INVALID: directive label '{label}' does not match `_<id>.<ext>`")]
    InlineMediaLabel { label: String },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParse(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlashmarkError>;
