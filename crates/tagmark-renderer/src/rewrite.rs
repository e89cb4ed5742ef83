//! Symbol rewriting: inline trigger symbols → canonical bracket tags.

use std::sync::Arc;

use tagmark_rules::{RuleKind, RuleRegistry};

/// Rewrites trigger symbols into bracket-tag form.
///
/// Symbols are processed in registry insertion order, one full pass per
/// symbol over the progressively-rewritten text:
///
/// - Standalone rules: every occurrence of the symbol becomes `[name]`.
/// - Enclosing rules: occurrences are consumed pairwise — the first becomes
///   `[name]`, the next `[/name]`, alternating through the text. A trailing
///   unpaired occurrence is left as literal text.
///
/// A backslash immediately before an occurrence protects it: the occurrence
/// is skipped, does not participate in pair alternation, and the backslash is
/// stripped at the end of the pass.
pub struct SymbolRewriter {
    registry: Arc<RuleRegistry>,
}

impl SymbolRewriter {
    /// Create a rewriter over the given registry.
    #[must_use]
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self { registry }
    }

    /// Rewrite all registered trigger symbols in `text`.
    #[must_use]
    pub fn rewrite(&self, text: &str) -> String {
        let mut text = text.to_owned();

        for (symbol, name) in self.registry.symbols() {
            let Some(rule) = self.registry.resolve(name) else {
                tracing::warn!(symbol, name, "trigger symbol refers to an unknown rule");
                continue;
            };

            text = match rule.kind() {
                RuleKind::Standalone => {
                    replace_all_unescaped(&text, symbol, &format!("[{name}]"))
                }
                RuleKind::Enclosing => replace_alternating(
                    &text,
                    symbol,
                    &format!("[{name}]"),
                    &format!("[/{name}]"),
                ),
            };
        }

        // All symbol passes are done; escaped occurrences drop their backslash.
        for (symbol, _) in self.registry.symbols() {
            text = text.replace(&format!("\\{symbol}"), symbol);
        }

        text
    }
}

/// Byte offsets of occurrences of `needle` not preceded by a backslash.
fn unescaped_occurrences(text: &str, needle: &str) -> Vec<usize> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(rel) = text[pos..].find(needle) {
        let idx = pos + rel;
        if idx == 0 || text.as_bytes()[idx - 1] != b'\\' {
            found.push(idx);
        }
        pos = idx + needle.len();
    }
    found
}

/// Replace every unescaped occurrence of `needle` with `replacement`.
fn replace_all_unescaped(text: &str, needle: &str, replacement: &str) -> String {
    splice(text, needle, &unescaped_occurrences(text, needle), |_| {
        replacement
    })
}

/// Replace unescaped occurrences of `needle` pairwise: even occurrences get
/// `open`, odd get `close`. A trailing unpaired occurrence stays literal.
fn replace_alternating<'a>(
    text: &str,
    needle: &'a str,
    open: &'a str,
    close: &'a str,
) -> String {
    let occurrences = unescaped_occurrences(text, needle);
    let paired = occurrences.len() - occurrences.len() % 2;

    splice(text, needle, &occurrences, |i| {
        if i >= paired {
            needle
        } else if i % 2 == 0 {
            open
        } else {
            close
        }
    })
}

/// Rebuild `text`, substituting the occurrence at each offset with whatever
/// `replacement_for` returns for its index.
fn splice<'a>(
    text: &str,
    needle: &str,
    occurrences: &[usize],
    replacement_for: impl Fn(usize) -> &'a str,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (i, &idx) in occurrences.iter().enumerate() {
        out.push_str(&text[last..idx]);
        out.push_str(replacement_for(i));
        last = idx + needle.len();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagmark_rules::{Rule, TransformError};

    fn registry_with(name: &str, kind: RuleKind, symbol: &str) -> Arc<RuleRegistry> {
        let mut registry = RuleRegistry::new();
        registry.register(Rule::new(
            name,
            kind,
            Box::new(|content: Option<&str>| {
                Ok::<_, TransformError>(content.unwrap_or_default().to_owned())
            }),
        ));
        registry.register_symbol(symbol, name);
        Arc::new(registry)
    }

    #[test]
    fn test_enclosing_pairwise() {
        let rewriter = SymbolRewriter::new(registry_with("note", RuleKind::Enclosing, "!!"));
        assert_eq!(rewriter.rewrite("!!x!!"), "[note]x[/note]");
    }

    #[test]
    fn test_enclosing_multiple_pairs() {
        let rewriter = SymbolRewriter::new(registry_with("note", RuleKind::Enclosing, "!!"));
        assert_eq!(
            rewriter.rewrite("!!a!! and !!b!!"),
            "[note]a[/note] and [note]b[/note]"
        );
    }

    #[test]
    fn test_odd_trailing_symbol_left_literal() {
        let rewriter = SymbolRewriter::new(registry_with("note", RuleKind::Enclosing, "!!"));
        assert_eq!(rewriter.rewrite("!!x!!y!!"), "[note]x[/note]y!!");
    }

    #[test]
    fn test_single_symbol_left_literal() {
        let rewriter = SymbolRewriter::new(registry_with("note", RuleKind::Enclosing, "!!"));
        assert_eq!(rewriter.rewrite("just !! here"), "just !! here");
    }

    #[test]
    fn test_standalone_replaces_all() {
        let rewriter = SymbolRewriter::new(registry_with("hr", RuleKind::Standalone, "%%"));
        assert_eq!(rewriter.rewrite("a %% b %% c %%"), "a [hr] b [hr] c [hr]");
    }

    #[test]
    fn test_escaped_symbol_is_literal() {
        let rewriter = SymbolRewriter::new(registry_with("note", RuleKind::Enclosing, "!!"));
        // The escaped middle occurrence does not join the alternation.
        assert_eq!(rewriter.rewrite(r"!!a\!!b!!"), "[note]a!!b[/note]");
    }

    #[test]
    fn test_escaped_standalone_symbol() {
        let rewriter = SymbolRewriter::new(registry_with("hr", RuleKind::Standalone, "%%"));
        assert_eq!(rewriter.rewrite(r"\%% and %%"), "%% and [hr]");
    }

    #[test]
    fn test_symbols_rewritten_in_registration_order() {
        let mut registry = RuleRegistry::new();
        for name in ["first", "second"] {
            registry.register(Rule::new(
                name,
                RuleKind::Standalone,
                Box::new(|_: Option<&str>| Ok::<_, TransformError>(String::new())),
            ));
        }
        registry.register_symbol("$$", "first");
        registry.register_symbol("$", "second");
        let rewriter = SymbolRewriter::new(Arc::new(registry));

        // "$$" is processed before "$", so it wins the overlapping span.
        assert_eq!(rewriter.rewrite("$$"), "[first]");
    }

    #[test]
    fn test_no_symbols_is_identity() {
        let rewriter = SymbolRewriter::new(Arc::new(RuleRegistry::with_builtins()));
        assert_eq!(rewriter.rewrite("plain **markdown** text"), "plain **markdown** text");
    }
}
