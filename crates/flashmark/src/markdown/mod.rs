//! Structured (Markdown) dialect: parsing front end and renderer

mod attention;
mod deflist;
mod directive;
mod escapes;
pub mod ext;
mod headerless;
mod parse;
pub mod render;

pub use parse::{ParsedMarkdown, parse_markdown};
