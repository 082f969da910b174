//! Writing converted text

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Writes `content` to `target`, or to stdout followed by a newline
pub fn emit(target: Option<&Path>, content: &str) -> Result<()> {
    match target {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{content}")?;
            Ok(())
        }
    }
}

/// Serializes `value` as pretty JSON and emits it
pub fn emit_json<T: Serialize>(target: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    emit(target, &json)
}
