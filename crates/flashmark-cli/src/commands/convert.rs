//! Conversion commands

use crate::context::{Context, read_input};
use crate::output::{emit, emit_json};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

/// `to-markdown --json` output schema
#[derive(Debug, Serialize)]
struct StructuredOutput {
    markdown: String,
    cloze: u32,
}

/// Converts flat HTML to Markdown
///
/// Without `--json` the cloze ordinal is only logged.
pub fn to_markdown(
    ctx: &Context,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let html = read_input(input.as_deref())?;
    let (markdown, cloze) = ctx.converter.to_structured(&html)?;
    log::info!("highest cloze ordinal: {cloze}");

    if json {
        emit_json(output.as_deref(), &StructuredOutput { markdown, cloze })
    } else {
        emit(output.as_deref(), &markdown)
    }
}

/// Converts Markdown to flat HTML
pub fn to_html(ctx: &Context, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let markdown = read_input(input.as_deref())?;
    let html = ctx.converter.to_flat(&markdown)?;
    emit(output.as_deref(), &html)
}
