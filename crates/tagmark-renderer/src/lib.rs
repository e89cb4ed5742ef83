//! Symbol rewriting, tag expansion, and the render pipeline.
//!
//! This crate turns raw document text into HTML in three strictly ordered
//! steps:
//!
//! 1. **Rewrite** ([`SymbolRewriter`]): inline trigger symbols become
//!    canonical bracket tags (`^^x^^` → `[shout]x[/shout]`).
//! 2. **Expand** ([`TagExpander`]): bracket tags are replaced by each rule's
//!    transform output.
//! 3. **Render**: the expanded text goes through pulldown-cmark, which is
//!    treated as a black box.
//!
//! [`RenderPipeline`] orchestrates all three and is the only entry point most
//! callers need.
//!
//! # Escaping
//!
//! A backslash protects the character(s) after it from this layer: `\[` never
//! opens a tag and `\^^` (for a registered symbol `^^`) never triggers a
//! rewrite. The backslash itself is consumed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tagmark_renderer::RenderPipeline;
//! use tagmark_rules::RuleRegistry;
//!
//! let registry = Arc::new(RuleRegistry::with_builtins());
//! let pipeline = RenderPipeline::new(registry);
//!
//! let result = pipeline.render("[bold]hi[/bold]");
//! assert!(result.html.contains("<strong>hi</strong>"));
//! ```

mod expand;
mod pipeline;
mod rewrite;

pub use expand::TagExpander;
pub use pipeline::{RenderPipeline, RenderResult};
pub use rewrite::SymbolRewriter;
