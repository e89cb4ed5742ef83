//! Render pipeline: rewrite → expand → markdown.

use std::sync::Arc;

use pulldown_cmark::{Options, Parser};
use tagmark_rules::RuleRegistry;

use crate::expand::TagExpander;
use crate::rewrite::SymbolRewriter;

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Warnings generated during expansion (e.g., failing rule transforms).
    pub warnings: Vec<String>,
}

/// Orchestrates the full render: symbol rewrite, tag expansion, then the
/// standard markdown render.
///
/// The whole document is reprocessed on every call — no partial or streaming
/// output. The pipeline runs synchronously on the caller's thread; the
/// registry is immutable after the load phase, so a pipeline can be shared
/// freely without locking.
pub struct RenderPipeline {
    rewriter: SymbolRewriter,
    expander: TagExpander,
}

impl RenderPipeline {
    /// Create a pipeline over a fully-loaded registry.
    #[must_use]
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self {
            rewriter: SymbolRewriter::new(Arc::clone(&registry)),
            expander: TagExpander::new(registry),
        }
    }

    /// Render raw document text to HTML.
    ///
    /// Steps, strictly ordered: rewrite trigger symbols into bracket tags,
    /// expand bracket tags through rule transforms, render the result as
    /// markdown.
    #[must_use]
    pub fn render(&self, raw: &str) -> RenderResult {
        let rewritten = self.rewriter.rewrite(raw);
        let (expanded, warnings) = self.expander.expand(&rewritten);
        let html = render_markdown(&expanded);
        RenderResult { html, warnings }
    }
}

/// Hand the expanded text to pulldown-cmark.
///
/// Rule output is inline HTML, which commonmark passes through unchanged.
fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(text, options);
    let mut html = String::with_capacity(text.len() * 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}
