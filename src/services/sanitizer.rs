//! Completion text sanitization
//!
//! Models sometimes wrap the JSON they were told not to fence in markdown
//! code fences anyway. This strips the wrapping without touching interior
//! content; newlines and indentation inside the text (e.g. pseudocode)
//! are meaningful downstream and must survive unchanged.

/// Strip one layer of fence markers and surrounding whitespace
fn strip_fences(text: &str) -> &str {
    let mut s = text.trim();

    if let Some(rest) = s.strip_prefix("```") {
        // Optional language tag straight after the opening fence
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        s = rest.trim_start();
    }

    if let Some(rest) = s.strip_suffix("```") {
        s = rest.trim_end();
    }

    s
}

/// Remove leading/trailing markdown code-fence markers and surrounding
/// whitespace.
///
/// Runs to a fixpoint, so the operation is idempotent even for doubly
/// fenced completions. Never fails; empty input yields the empty string.
pub fn sanitize(text: &str) -> String {
    let mut current = text;
    loop {
        let next = strip_fences(current);
        if next == current {
            return current.to_string();
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_json_fence() {
        assert_eq!(sanitize("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strips_untagged_fence() {
        assert_eq!(sanitize("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn test_strips_uppercase_tag() {
        assert_eq!(sanitize("```JSON\n{}\n```"), "{}");
    }

    #[test]
    fn test_plain_text_only_trimmed() {
        assert_eq!(sanitize("  {\"a\": 1}  \n"), "{\"a\": 1}");
    }

    #[test]
    fn test_empty_input_yields_empty_string() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \n  "), "");
        assert_eq!(sanitize("```"), "");
    }

    #[test]
    fn test_interior_newlines_and_indentation_preserved() {
        let body = "{\n  \"pseudocode\": \"forever:\\n  move 10\"\n}";
        let fenced = format!("```json\n{body}\n```");
        assert_eq!(sanitize(&fenced), body);
    }

    #[test]
    fn test_interior_fence_markers_untouched() {
        let body = "use ``` to fence code";
        let fenced = format!("```\n{body}\n```");
        assert_eq!(sanitize(&fenced), body);
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "```json\n{\"a\": 1}\n```",
            "```\n```json\n{}\n```\n```",
            "plain text",
            "",
            "```json{}```",
            "trailing only```",
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_fence_without_newline_after_tag() {
        assert_eq!(sanitize("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_one_sided_fences() {
        assert_eq!(sanitize("```json\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(sanitize("{\"a\":1}\n```"), "{\"a\":1}");
    }
}
