//! Config command - print the effective options

use crate::context::Context;
use crate::output::{emit, emit_json};
use anyhow::Result;

pub fn run(ctx: &Context, json: bool) -> Result<()> {
    let options = ctx.options();
    if json {
        emit_json(None, options)
    } else {
        emit(None, options.to_toml_string()?.trim_end())
    }
}
