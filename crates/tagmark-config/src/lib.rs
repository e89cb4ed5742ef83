//! Configuration management for tagmark.
//!
//! Parses `tagmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tagmark.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the rule-definition unit directory.
    pub rules_dir: Option<PathBuf>,
    /// Override the unit file extension.
    pub extension: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule loading configuration.
    pub rules: RulesConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rule loading configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Directory containing rule-definition units. Relative paths are
    /// resolved against the config file's directory.
    pub dir: PathBuf,
    /// Unit file extension, without the leading dot.
    pub extension: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("mods"),
            extension: "sh".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `tagmark.toml` in the current directory and parents.
    /// Falls back to defaults when no file is found.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Load and parse a config file, resolving relative paths against its
    /// parent directory.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;

        if config.rules.dir.is_relative()
            && let Some(base) = path.parent()
        {
            config.rules.dir = base.join(&config.rules.dir);
        }
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Search for `tagmark.toml` in the current directory and its parents.
    fn discover_config() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(rules_dir) = &settings.rules_dir {
            self.rules.dir.clone_from(rules_dir);
        }
        if let Some(extension) = &settings.extension {
            self.rules.extension.clone_from(extension);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rules.dir, PathBuf::from("mods"));
        assert_eq!(config.rules.extension, "sh");
    }

    #[test]
    fn test_load_from_file_resolves_relative_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagmark.toml");
        std::fs::write(&path, "[rules]\ndir = \"syntax\"\nextension = \"rule\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.rules.dir, dir.path().join("syntax"));
        assert_eq!(config.rules.extension, "rule");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_explicit_missing_path_errors() {
        let result = Config::load(Some(Path::new("/nonexistent/tagmark.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_cli_settings_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagmark.toml");
        std::fs::write(&path, "[rules]\ndir = \"syntax\"\n").unwrap();

        let settings = CliSettings {
            rules_dir: Some(PathBuf::from("/override")),
            extension: None,
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.rules.dir, PathBuf::from("/override"));
        // Unset CLI fields leave config values alone.
        assert_eq!(config.rules.extension, "sh");
    }

    #[test]
    fn test_malformed_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagmark.toml");
        std::fs::write(&path, "rules = \"not a table\"\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }
}
