//! Rule entity and the transformation capability trait.

use std::fmt;

use crate::error::TransformError;

/// Arity class of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// Wraps content between an opening `[name]` and closing `[/name]` tag.
    Enclosing,
    /// Triggered by a lone `[name]` tag; takes no content.
    Standalone,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enclosing => f.write_str("enclosing"),
            Self::Standalone => f.write_str("standalone"),
        }
    }
}

/// A rule's transformation logic.
///
/// Implementations are capabilities: the registry and expander do not care
/// whether the callable is a native function, a closure, or a subprocess
/// wrapper ([`ScriptTransform`](crate::ScriptTransform)).
///
/// Enclosing rules receive `Some(content)` — the opaque substring between
/// their open and close tags. Standalone rules receive `None`.
pub trait Transform: Send + Sync {
    /// Apply the transformation, producing the replacement fragment.
    fn apply(&self, content: Option<&str>) -> Result<String, TransformError>;
}

impl<F> Transform for F
where
    F: Fn(Option<&str>) -> Result<String, TransformError> + Send + Sync,
{
    fn apply(&self, content: Option<&str>) -> Result<String, TransformError> {
        self(content)
    }
}

/// A registered transformation rule.
///
/// The name doubles as the bracket-tag name: `[name]...[/name]` for
/// enclosing rules, `[name]` for standalone rules.
pub struct Rule {
    name: String,
    kind: RuleKind,
    transform: Box<dyn Transform>,
}

impl Rule {
    /// Create a new rule.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: RuleKind, transform: Box<dyn Transform>) -> Self {
        Self {
            name: name.into(),
            kind,
            transform,
        }
    }

    /// Rule name (also the bracket-tag name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arity class.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Run the rule's transform.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying [`Transform`] returns. Expansion
    /// callers substitute an inline error marker rather than aborting.
    pub fn apply(&self, content: Option<&str>) -> Result<String, TransformError> {
        self.transform.apply(content)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Check if a name is usable as a rule name.
///
/// Valid names contain only alphanumeric characters, hyphens, and
/// underscores, which keeps the bracket-tag grammar unambiguous.
#[must_use]
pub(crate) fn is_valid_rule_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
