//! Converter options and the pipeline resolved from them

mod model;
pub mod pipeline;

pub use model::{
    Extensions, HardBreak, MarkdownFormat, Options, SpreadMode, Strikethrough, TableStyle,
};
pub use pipeline::Pipeline;
