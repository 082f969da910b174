mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::Context;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = Context::new(cli.config.as_deref()).and_then(|ctx| match cli.command {
        Commands::ToMarkdown {
            input,
            output,
            json,
        } => commands::convert::to_markdown(&ctx, input, output, json),
        Commands::ToHtml { input, output } => commands::convert::to_html(&ctx, input, output),
        Commands::Config { json } => commands::config::run(&ctx, json),
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
