//! Test utilities for flashmark
//!
//! Shared reference conversions and scratch-directory helpers used across
//! the workspace's test suites.

pub mod fixtures;

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Default options, spelled out as TOML
pub const DEFAULT_CONFIG_TOML: &str = r#"[markdown]
bullet = "-"
hard_break = "spaces"

[extensions]
definition_lists = true
inline_media = true
tables = "extended"
table_newline = "¨"
underline = true
superscript = true
subscript = true
strikethrough = "double"
list_spread = "auto"
"#;

/// A flashcard add-on `config.json` with its display keys
pub const ADDON_CONFIG_JSON: &str = r#"{
  "Markdown format": {
    "bullet": "*",
    "listItemIndent": "one",
    "ruleRepetition": 10,
    "tightDefinitions": true,
    "fences": true,
    "hardBreak": "escape"
  },
  "Markdown extensions": {
    "Definition lists": true,
    "Inline media": true,
    "Tables": "extended",
    "Table newline": "¨",
    "Underline": true,
    "Superscript": true,
    "Subscript": true,
    "Strikethrough": "double"
  }
}"#;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// # Panics
///
/// Panics if the directory cannot be created.
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");
    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}

/// Writes `content` to `dir/name` and returns the path
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}
