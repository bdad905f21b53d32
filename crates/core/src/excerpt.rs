//! Description excerpts derived from page content.

use std::sync::LazyLock;

use regex::Regex;

/// Leading `#` runs at the start of a line (markdown heading markers).
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+").expect("valid regex"));

/// Maximum excerpt length, in characters.
const DESCRIPTION_CHARS: usize = 200;

/// Derive a page description from its raw markdown content.
///
/// Takes the first 200 characters and strips markdown heading marker runs
/// from line starts. Recomputed whenever content changes, never stored
/// independently of it.
pub fn derive_description(content: &str) -> String {
    let prefix: String = content.chars().take(DESCRIPTION_CHARS).collect();
    HEADING_RE.replace_all(&prefix, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_kept_whole() {
        assert_eq!(derive_description("plain text"), "plain text");
    }

    #[test]
    fn truncates_to_200_chars() {
        let content = "x".repeat(500);
        assert_eq!(derive_description(&content).chars().count(), 200);
    }

    #[test]
    fn strips_heading_markers_at_line_starts() {
        assert_eq!(
            derive_description("## Title\nbody\n### Sub"),
            " Title\nbody\n Sub"
        );
    }

    #[test]
    fn keeps_hashes_inside_lines() {
        assert_eq!(derive_description("issue #42"), "issue #42");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let content = "é".repeat(300);
        assert_eq!(derive_description(&content).chars().count(), 200);
    }

    #[test]
    fn empty_content_yields_empty_description() {
        assert_eq!(derive_description(""), "");
    }
}
