//! `tagmark render` command implementation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tagmark_config::{CliSettings, Config};
use tagmark_renderer::RenderPipeline;

use crate::commands::load_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input document (UTF-8 text or markdown).
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,

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

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, rule loading, or file I/O fails.
    /// Per-rule expansion failures are warnings, not errors.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            rules_dir: self.rules_dir,
            extension: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let registry = load_registry(&config, &output)?;
        let pipeline = RenderPipeline::new(Arc::new(registry));

        let raw = fs::read_to_string(&self.input)?;
        let result = pipeline.render(&raw);

        for warning in &result.warnings {
            output.warning(warning);
        }

        match self.out {
            Some(path) => {
                fs::write(&path, &result.html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.html.as_bytes())?;
            }
        }

        Ok(())
    }
}
