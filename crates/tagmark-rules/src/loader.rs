//! Rule discovery from the rules directory.
//!
//! Scans a configured directory for rule-definition units (executable
//! scripts), parses the structured `Symbol:`/`Single-side:` comment header,
//! and registers a subprocess-backed transform for each unit.
//!
//! Units are processed in filename order so collisions resolve
//! deterministically: of two units claiming the same name or symbol, the
//! lexicographically later one wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RuleError;
use crate::registry::RuleRegistry;
use crate::rule::{Rule, RuleKind, is_valid_rule_name};
use crate::script::ScriptTransform;

/// Structured header grammar: `Symbol: <token> Single-side: <True|False>`.
///
/// `<token>` is any run of non-whitespace characters; the boolean literal is
/// the exact string `True` or `False`. The header may appear anywhere in the
/// unit, typically on a comment line near the top.
static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Symbol:\s*(\S+)\s+Single-side:\s*(True|False)").unwrap());

/// Configuration for [`RuleLoader`].
#[derive(Clone, Debug)]
pub struct RuleLoaderConfig {
    /// Directory containing rule-definition units.
    pub rules_dir: PathBuf,
    /// Unit file extension, without the leading dot.
    pub extension: String,
}

impl Default for RuleLoaderConfig {
    fn default() -> Self {
        Self {
            rules_dir: PathBuf::from("mods"),
            extension: "sh".to_owned(),
        }
    }
}

/// Report of a completed load phase.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of rules registered from units, in load order.
    pub loaded: Vec<String>,
    /// Units skipped during loading, with the reason.
    pub skipped: Vec<(PathBuf, RuleError)>,
    /// True when the rules directory was absent and has just been created.
    pub created_dir: bool,
}

/// Discovers rule-definition units and registers them.
///
/// A unit that fails to load is skipped with a warning rather than aborting
/// the whole load phase, so one broken rule file cannot take down startup.
pub struct RuleLoader {
    config: RuleLoaderConfig,
}

impl RuleLoader {
    /// Create a loader for the configured rules directory.
    #[must_use]
    pub fn new(config: RuleLoaderConfig) -> Self {
        Self { config }
    }

    /// Load all units into `registry`.
    ///
    /// If the rules directory does not exist it is created and the report's
    /// `created_dir` flag is set (first-run experience); no units are loaded
    /// in that case.
    ///
    /// # Errors
    ///
    /// Returns an error only when the directory itself cannot be created or
    /// enumerated. Per-unit failures land in [`LoadReport::skipped`].
    pub fn load_into(&self, registry: &mut RuleRegistry) -> Result<LoadReport, RuleError> {
        let mut report = LoadReport::default();
        let dir = &self.config.rules_dir;

        if !dir.exists() {
            fs::create_dir_all(dir)?;
            tracing::info!(dir = %dir.display(), "created rules directory");
            report.created_dir = true;
            return Ok(report);
        }

        let mut units: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == self.config.extension.as_str())
            })
            .collect();
        units.sort();

        for path in units {
            match self.load_unit(&path, registry) {
                Ok(name) => report.loaded.push(name),
                Err(err) => {
                    tracing::warn!(unit = %path.display(), error = %err, "skipping rule unit");
                    report.skipped.push((path, err));
                }
            }
        }

        Ok(report)
    }

    /// Load a single unit and register its rule.
    fn load_unit(&self, path: &Path, registry: &mut RuleRegistry) -> Result<String, RuleError> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(RuleError::NotAFile(path.to_path_buf()));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(RuleError::NotExecutable(path.to_path_buf()));
            }
        }

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| is_valid_rule_name(stem))
            .ok_or_else(|| RuleError::InvalidName(path.to_path_buf()))?
            .to_owned();

        let text = fs::read_to_string(path)?;
        let header = parse_header(&text);
        let kind = header
            .as_ref()
            .map_or(RuleKind::Enclosing, |(_, kind)| *kind);

        registry.register(Rule::new(
            &name,
            kind,
            Box::new(ScriptTransform::new(path)),
        ));
        if let Some((symbol, _)) = header {
            registry.register_symbol(symbol, &name);
        } else {
            tracing::debug!(name = %name, "unit has no parsable header, bracket-tag form only");
        }

        tracing::debug!(name = %name, kind = %kind, "registered rule");
        Ok(name)
    }
}

/// Parse the structured header from a unit's text.
///
/// Returns `(symbol, kind)` when present; `None` means the rule is
/// registered in bracket-tag form only.
fn parse_header(text: &str) -> Option<(String, RuleKind)> {
    let caps = HEADER_PATTERN.captures(text)?;
    let symbol = caps[1].to_owned();
    let kind = if &caps[2] == "True" {
        RuleKind::Standalone
    } else {
        RuleKind::Enclosing
    };
    Some((symbol, kind))
}
