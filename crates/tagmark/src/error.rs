//! CLI error types.

use tagmark_config::ConfigError;
use tagmark_rules::RuleError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Rules(#[from] RuleError),
}
