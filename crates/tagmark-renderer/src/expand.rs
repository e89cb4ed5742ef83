//! Tag expansion: canonical bracket tags → rule output.

use std::sync::Arc;

use regex::Regex;
use tagmark_rules::{RuleKind, RuleRegistry};

/// Sentinel standing in for an escaped `\[` while rule patterns run.
///
/// The regex crate has no lookbehind, so escaped opens are shielded with a
/// private-use character before matching and restored afterwards. Documents
/// containing this codepoint would confuse the round trip; real text does not
/// use the private-use area.
const ESCAPED_OPEN: char = '\u{E000}';

/// Expands bracket tags by applying each rule's transform.
///
/// Rules are applied in registry insertion order, a single linear pass over
/// the progressively-rewritten text:
///
/// - Enclosing: `[name]` … `[/name]` matched non-greedily across newlines;
///   every non-overlapping span is replaced leftmost-first with
///   `transform(content)`.
/// - Standalone: every literal `[name]` is replaced with `transform()`.
///
/// A rule's own output is not re-scanned for its own tags, but a later rule
/// in iteration order can incidentally match bracket-shaped text an earlier
/// rule produced.
///
/// A failing transform does not abort the pass: the span is replaced with a
/// visible inline error marker and a warning is recorded.
pub struct TagExpander {
    registry: Arc<RuleRegistry>,
    /// Compiled tag patterns, parallel to registry iteration order.
    patterns: Vec<Regex>,
}

impl TagExpander {
    /// Create an expander, precompiling one pattern per registered rule.
    ///
    /// The registry is read-only after the load phase, so compilation happens
    /// exactly once.
    #[must_use]
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        let patterns = registry
            .rules()
            .map(|rule| {
                let name = regex::escape(rule.name());
                let pattern = match rule.kind() {
                    RuleKind::Enclosing => format!(r"(?s)\[{name}\](.*?)\[/{name}\]"),
                    RuleKind::Standalone => format!(r"\[{name}\]"),
                };
                Regex::new(&pattern).unwrap()
            })
            .collect();

        Self { registry, patterns }
    }

    /// Expand all registered rules in `text`.
    ///
    /// Returns the expanded text and any warnings from failing transforms.
    #[must_use]
    pub fn expand(&self, text: &str) -> (String, Vec<String>) {
        let mut warnings = Vec::new();
        let mut text = text.replace(r"\[", &ESCAPED_OPEN.to_string());

        for (rule, pattern) in self.registry.rules().zip(&self.patterns) {
            if !pattern.is_match(&text) {
                continue;
            }

            text = pattern
                .replace_all(&text, |caps: &regex::Captures<'_>| {
                    let content = match rule.kind() {
                        RuleKind::Enclosing => Some(caps.get(1).map_or("", |m| m.as_str())),
                        RuleKind::Standalone => None,
                    };
                    match rule.apply(content) {
                        Ok(fragment) => fragment,
                        Err(err) => {
                            tracing::warn!(rule = rule.name(), error = %err, "rule failed");
                            warnings.push(format!("rule '{}' failed: {err}", rule.name()));
                            format!(
                                r#"<span class="rule-error">{}: {}</span>"#,
                                rule.name(),
                                escape_html(&err.to_string())
                            )
                        }
                    }
                })
                .into_owned();
        }

        (text.replace(ESCAPED_OPEN, "["), warnings)
    }
}

/// Minimal HTML escaping for text interpolated into error markers.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
