//! Per-invocation state for CLI commands

use anyhow::{Context as _, Result};
use flashmark::{Converter, Options};
use std::io::Read;
use std::path::Path;

/// Loaded options and the converter built from them
pub struct Context {
    pub converter: Converter,
}

impl Context {
    /// Loads options from `config`, or uses the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// options fail validation.
    pub fn new(config: Option<&Path>) -> Result<Self> {
        let options = match config {
            Some(path) => {
                log::debug!("loading options from {}", path.display());
                Options::from_file(path)?
            }
            None => Options::default(),
        };
        let converter = Converter::new(options)?;
        Ok(Self { converter })
    }

    pub fn options(&self) -> &Options {
        self.converter.options()
    }
}

/// Reads the whole input; `None` or `-` is stdin
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
