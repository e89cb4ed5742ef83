//! Built-in presentational rules.

use crate::error::TransformError;
use crate::registry::RuleRegistry;
use crate::rule::{Rule, RuleKind, Transform};

/// Transform that wraps content in a fixed HTML element pair.
struct WrapTag {
    open: &'static str,
    close: &'static str,
}

impl Transform for WrapTag {
    fn apply(&self, content: Option<&str>) -> Result<String, TransformError> {
        let content = content.unwrap_or_default();
        Ok(format!("{}{}{}", self.open, content, self.close))
    }
}

/// Seed the registry with the default enclosing rules.
pub(crate) fn seed(registry: &mut RuleRegistry) {
    let defaults = [
        ("bold", "<strong>", "</strong>"),
        ("italic", "<em>", "</em>"),
        ("underline", "<u>", "</u>"),
        ("strikethrough", "<del>", "</del>"),
    ];

    for (name, open, close) in defaults {
        registry.register(Rule::new(
            name,
            RuleKind::Enclosing,
            Box::new(WrapTag { open, close }),
        ));
    }
}
