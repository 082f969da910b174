//! Bidirectional conversion between a flashcard editor's flat HTML and
//! extended Markdown.
//!
//! ```text
//! html  -> parse -> normalize_html     -> tree_to_mdast -> render     -> markdown
//! markdown -> parse -> mdast_to_tree -> normalize_markdown -> to_html -> html
//! ```

// Core modules
pub mod cloze;
pub mod config;
pub mod context;
pub mod converter;
pub mod error;
pub mod inline_media;
pub mod markdown;
pub mod mdast_to_tree;
pub mod normalize;
pub mod spread;
pub mod table_newline;
pub mod tree;
pub mod tree_to_mdast;

// Re-export commonly used types
pub use config::Options;
pub use converter::Converter;
pub use error::{FlashmarkError, Result};
