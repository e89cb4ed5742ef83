//! Rule registry and loader for the tagmark substitution engine.
//!
//! A *rule* is a named transformation applied to bracket-tag spans in a
//! document (`[name]content[/name]` or a lone `[name]`). Rules come from two
//! places:
//!
//! - **Built-ins** ([`RuleRegistry::with_builtins`]): presentational wrappers
//!   (`bold`, `italic`, `underline`, `strikethrough`).
//! - **Rule-definition units** ([`RuleLoader`]): executable scripts discovered
//!   in a configured directory at startup. Each unit becomes a
//!   subprocess-backed [`Transform`]; an optional structured comment header
//!   binds a short trigger symbol and selects the arity class.
//!
//! # Architecture
//!
//! The registry is populated once during the load phase and is read-only for
//! the lifetime of the process. Downstream consumers (the symbol rewriter and
//! tag expander in `tagmark-renderer`) iterate rules in insertion order and
//! never observe mutation, so no locking is needed.
//!
//! The transform representation is a capability: [`Transform`] is object-safe
//! and implemented both by native functions and by [`ScriptTransform`], so the
//! registry is agnostic to how a callable was obtained.
//!
//! # Example
//!
//! ```
//! use tagmark_rules::{Rule, RuleKind, RuleRegistry, TransformError};
//!
//! let mut registry = RuleRegistry::with_builtins();
//! registry.register(Rule::new(
//!     "shout",
//!     RuleKind::Enclosing,
//!     Box::new(|content: Option<&str>| {
//!         Ok::<_, TransformError>(content.unwrap_or_default().to_uppercase())
//!     }),
//! ));
//! registry.register_symbol("^^", "shout");
//!
//! let rule = registry.resolve("shout").unwrap();
//! assert_eq!(rule.apply(Some("hi")).unwrap(), "HI");
//! ```

mod builtin;
mod error;
mod loader;
mod registry;
mod rule;
mod script;

pub use error::{RuleError, TransformError};
pub use loader::{LoadReport, RuleLoader, RuleLoaderConfig};
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleKind, Transform};
pub use script::ScriptTransform;
