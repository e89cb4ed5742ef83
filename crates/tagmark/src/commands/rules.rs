//! `tagmark rules` command implementation.

use std::path::PathBuf;

use clap::Args;
use tagmark_config::{CliSettings, Config};

use crate::commands::load_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the rules command.
#[derive(Args)]
pub(crate) struct RulesArgs {
    /// Path to configuration file (default: auto-discover tagmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rule-definition unit directory (overrides config).
    #[arg(long)]
    rules_dir: Option<PathBuf>,

    /// Enable verbose output (show rule loading logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RulesArgs {
    /// Execute the rules command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or rule loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            rules_dir: self.rules_dir,
            extension: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let registry = load_registry(&config, &output)?;

        output.highlight(&format!("{} registered rules", registry.len()));
        for rule in registry.rules() {
            let symbol = registry
                .symbol_for(rule.name())
                .map_or_else(String::new, |s| format!("  (trigger: {s})"));
            output.info(&format!("  {} [{}]{symbol}", rule.name(), rule.kind()));
        }

        Ok(())
    }
}
