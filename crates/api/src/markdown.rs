//! Markdown-to-HTML rendering for page bodies.
//!
//! The lifecycle core treats rendering as an external collaborator; this
//! is that collaborator.

use std::sync::LazyLock;

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

/// A single newline sandwiched between non-blank characters.
static SOFT_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)\n(\S)").expect("valid regex"));

/// Render raw markdown to an HTML fragment.
///
/// Single newlines between non-blank lines are promoted to hard breaks
/// first, so plain-text pages keep their line shape instead of collapsing
/// into one paragraph. No sanitization happens here; the page body is
/// served as the author wrote it.
pub fn render(markdown: &str) -> String {
    let prepared = SOFT_BREAK_RE.replace_all(markdown, "${1}  \n${2}");

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(&prepared, options);
    let mut out = String::with_capacity(prepared.len() * 2);
    html::push_html(&mut out, parser);
    out
}
