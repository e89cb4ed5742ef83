//! Rule registry: name → rule, plus the trigger-symbol mapping.

use crate::builtin;
use crate::rule::Rule;

/// Registry of transformation rules.
///
/// Holds rules in insertion order (the order the rewriter and expander
/// iterate in) and a secondary `symbol → name` mapping for shorthand
/// triggers.
///
/// # Lifecycle
///
/// Populated once at startup — built-ins first, then discovered rules — and
/// read-only thereafter. Re-registering an existing name or symbol replaces
/// the previous binding in place, keeping its original position, so load
/// order stays deterministic.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    /// `(symbol, rule name)` pairs in insertion order.
    symbols: Vec<(String, String)>,
}

impl RuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in presentational rules
    /// (`bold`, `italic`, `underline`, `strikethrough`).
    ///
    /// Built-ins have no trigger symbols and are overridden if a discovered
    /// rule claims the same name.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::seed(&mut registry);
        registry
    }

    /// Insert or overwrite the rule for its name.
    ///
    /// Overwriting silently discards the previous transform; a diagnostic is
    /// logged so collisions are at least visible.
    pub fn register(&mut self, rule: Rule) {
        if let Some(existing) = self.rules.iter_mut().find(|r| r.name() == rule.name()) {
            tracing::warn!(name = rule.name(), "rule name collision, last loaded wins");
            *existing = rule;
        } else {
            self.rules.push(rule);
        }
    }

    /// Insert or overwrite the trigger-symbol mapping.
    ///
    /// At most one rule may own a given symbol; re-registering rebinds it.
    pub fn register_symbol(&mut self, symbol: impl Into<String>, name: impl Into<String>) {
        let symbol = symbol.into();
        let name = name.into();
        if let Some(existing) = self.symbols.iter_mut().find(|(s, _)| *s == symbol) {
            tracing::warn!(
                symbol = %symbol,
                old = %existing.1,
                new = %name,
                "trigger symbol collision, last loaded wins"
            );
            existing.1 = name;
        } else {
            self.symbols.push((symbol, name));
        }
    }

    /// Look up a rule by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// Rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// `(symbol, rule name)` pairs in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, &str)> {
        self.symbols.iter().map(|(s, n)| (s.as_str(), n.as_str()))
    }

    /// Trigger symbol registered for a rule name, if any.
    #[must_use]
    pub fn symbol_for(&self, name: &str) -> Option<&str> {
        self.symbols
            .iter()
            .find(|(_, n)| n == name)
            .map(|(s, _)| s.as_str())
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::rule::RuleKind;

    fn fixed(output: &'static str) -> Rule {
        Rule::new(
            "fixed",
            RuleKind::Standalone,
            Box::new(move |_: Option<&str>| Ok::<_, TransformError>(output.to_owned())),
        )
    }

    #[test]
    fn test_builtins_seeded() {
        let registry = RuleRegistry::with_builtins();

        for name in ["bold", "italic", "underline", "strikethrough"] {
            let rule = registry.resolve(name).unwrap();
            assert_eq!(rule.kind(), RuleKind::Enclosing);
            assert_eq!(registry.symbol_for(name), None);
        }
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_builtin_output() {
        let registry = RuleRegistry::with_builtins();

        let bold = registry.resolve("bold").unwrap();
        assert_eq!(bold.apply(Some("hi")).unwrap(), "<strong>hi</strong>");

        let strike = registry.resolve("strikethrough").unwrap();
        assert_eq!(strike.apply(Some("x")).unwrap(), "<del>x</del>");
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut registry = RuleRegistry::new();
        registry.register(fixed("first"));
        registry.register(Rule::new(
            "other",
            RuleKind::Standalone,
            Box::new(|_: Option<&str>| Ok::<_, TransformError>(String::new())),
        ));
        registry.register(fixed("second"));

        // Last registration wins but the original position is kept.
        assert_eq!(registry.len(), 2);
        let names: Vec<_> = registry.rules().map(Rule::name).collect();
        assert_eq!(names, vec!["fixed", "other"]);
        assert_eq!(
            registry.resolve("fixed").unwrap().apply(None).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_symbol_rebinding() {
        let mut registry = RuleRegistry::new();
        registry.register_symbol("++", "one");
        registry.register_symbol("**", "two");
        registry.register_symbol("++", "three");

        let pairs: Vec<_> = registry.symbols().collect();
        assert_eq!(pairs, vec![("++", "three"), ("**", "two")]);
    }

    #[test]
    fn test_resolve_missing() {
        let registry = RuleRegistry::with_builtins();
        assert!(registry.resolve("nope").is_none());
    }
}
