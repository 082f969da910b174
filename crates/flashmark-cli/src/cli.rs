//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flashmark")]
#[command(version, about = "Convert flashcard HTML to Markdown and back", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Options file (TOML, or JSON by extension)
    #[arg(short, long, global = true, env = "FLASHMARK_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert flat editor HTML to Markdown
    ToMarkdown {
        /// Input file, `-` or absent for stdin
        input: Option<PathBuf>,

        /// Output file, stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the Markdown and cloze ordinal as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert Markdown to flat editor HTML
    ToHtml {
        /// Input file, `-` or absent for stdin
        input: Option<PathBuf>,

        /// Output file, stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective options
    Config {
        #[arg(long)]
        json: bool,
    },
}
