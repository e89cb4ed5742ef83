//! tagmark CLI - custom-markup preview engine.
//!
//! Provides commands for:
//! - `render`: Render a document through the substitution pipeline to HTML
//! - `rules`: List registered rules and their trigger symbols

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, RulesArgs};
use output::Output;

/// tagmark - custom-markup preview engine.
#[derive(Parser)]
#[command(name = "tagmark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to HTML.
    Render(RenderArgs),
    /// List registered rules.
    Rules(RulesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Rules(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Rules(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
