use serde::{Deserialize, Serialize};

use crate::error::{FlashmarkError, Result};

/// Converter options; every section falls back to its defaults
///
/// Aliases accept the display keys of the flashcard add-on's own
/// `config.json`, so that file can be loaded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Options {
    #[serde(alias = "Markdown format")]
    pub markdown: MarkdownFormat,
    #[serde(alias = "Markdown extensions")]
    pub extensions: Extensions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownFormat {
    /// Unordered list marker: `-`, `*` or `+`
    pub bullet: char,
    #[serde(alias = "hardBreak")]
    pub hard_break: HardBreak,
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        Self {
            bullet: '-',
            hard_break: HardBreak::Spaces,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    #[serde(alias = "Definition lists")]
    pub definition_lists: bool,
    #[serde(alias = "Inline media")]
    pub inline_media: bool,
    #[serde(alias = "Tables")]
    pub tables: TableStyle,
    /// Table-cell line break sentinel; empty disables the codec
    #[serde(alias = "Table newline")]
    pub table_newline: String,
    #[serde(alias = "Underline")]
    pub underline: bool,
    #[serde(alias = "Superscript")]
    pub superscript: bool,
    #[serde(alias = "Subscript")]
    pub subscript: bool,
    #[serde(alias = "Strikethrough")]
    pub strikethrough: Strikethrough,
    #[serde(alias = "List spread")]
    pub list_spread: SpreadMode,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            definition_lists: true,
            inline_media: true,
            tables: TableStyle::Extended,
            table_newline: "¨".to_string(),
            underline: true,
            superscript: true,
            subscript: true,
            strikethrough: Strikethrough::Double,
            list_spread: SpreadMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HardBreak {
    /// Two trailing spaces
    Spaces,
    /// Trailing backslash
    Escape,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", try_from = "Choice")]
pub enum TableStyle {
    None,
    /// GFM tables
    Basic,
    /// GFM tables plus headerless tables
    Extended,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", try_from = "Choice")]
pub enum Strikethrough {
    Off,
    /// `~x~` and `~~x~~`
    Single,
    /// `~~x~~` only
    Double,
}

/// List looseness policy across the format boundary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpreadMode {
    /// Computed from structure and the persisted marker
    #[default]
    Auto,
    Tight,
    Loose,
}

/// Raw form of toggles that accept either a flag or a name
#[derive(Deserialize)]
#[serde(untagged)]
enum Choice {
    Flag(bool),
    Name(String),
}

impl TryFrom<Choice> for TableStyle {
    type Error = String;

    fn try_from(choice: Choice) -> std::result::Result<Self, Self::Error> {
        match choice {
            Choice::Flag(false) => Ok(TableStyle::None),
            Choice::Flag(true) => Ok(TableStyle::Extended),
            Choice::Name(name) => match name.to_ascii_lowercase().as_str() {
                "none" | "off" => Ok(TableStyle::None),
                "basic" | "gfm" => Ok(TableStyle::Basic),
                "extended" => Ok(TableStyle::Extended),
                other => Err(format!("unknown table style '{other}'")),
            },
        }
    }
}

impl TryFrom<Choice> for Strikethrough {
    type Error = String;

    fn try_from(choice: Choice) -> std::result::Result<Self, Self::Error> {
        match choice {
            Choice::Flag(false) => Ok(Strikethrough::Off),
            Choice::Flag(true) => Ok(Strikethrough::Double),
            Choice::Name(name) => match name.to_ascii_lowercase().as_str() {
                "off" | "none" => Ok(Strikethrough::Off),
                "single" => Ok(Strikethrough::Single),
                "double" => Ok(Strikethrough::Double),
                other => Err(format!("unknown strikethrough style '{other}'")),
            },
        }
    }
}

impl Options {
    /// Parses TOML options
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FlashmarkError::ConfigParse(e.to_string()))
    }

    /// Parses JSON options (the add-on's `config.json` layout)
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| FlashmarkError::ConfigParse(e.to_string()))
    }

    /// Reads options from a `.json` or TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FlashmarkError::ConfigParse(e.to_string()))
    }

    /// Checks values serde cannot constrain
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.markdown.bullet, '-' | '*' | '+') {
            return Err(FlashmarkError::ConfigInvalidValue {
                field: "markdown.bullet".to_string(),
                reason: format!("expected '-', '*' or '+', got '{}'", self.markdown.bullet),
            });
        }
        if self.extensions.table_newline.chars().count() > 1 {
            return Err(FlashmarkError::ConfigInvalidValue {
                field: "extensions.table_newline".to_string(),
                reason: format!(
                    "expected at most one character, got '{}'",
                    self.extensions.table_newline
                ),
            });
        }
        Ok(())
    }

    /// Table-cell sentinel, `None` when the codec is disabled
    pub fn sentinel(&self) -> Option<char> {
        self.extensions.table_newline.chars().next()
    }
}
