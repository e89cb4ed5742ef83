//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod rules;

pub(crate) use render::RenderArgs;
pub(crate) use rules::RulesArgs;

use tagmark_config::Config;
use tagmark_rules::{RuleLoader, RuleLoaderConfig, RuleRegistry};

use crate::error::CliError;
use crate::output::Output;

/// Build the registry for a command: built-ins plus discovered rules.
pub(crate) fn load_registry(config: &Config, output: &Output) -> Result<RuleRegistry, CliError> {
    let mut registry = RuleRegistry::with_builtins();
    let loader = RuleLoader::new(RuleLoaderConfig {
        rules_dir: config.rules.dir.clone(),
        extension: config.rules.extension.clone(),
    });

    let report = loader.load_into(&mut registry)?;

    if report.created_dir {
        output.info(&format!(
            "Created rules directory '{}'. Add rule-definition units there to extend the syntax.",
            config.rules.dir.display()
        ));
    }
    for (path, reason) in &report.skipped {
        output.warning(&format!("Skipped {}: {reason}", path.display()));
    }

    tracing::info!(
        rules = registry.len(),
        loaded = report.loaded.len(),
        skipped = report.skipped.len(),
        "rule registry ready"
    );

    Ok(registry)
}
