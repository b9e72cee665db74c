//! Filename sanitization for human-supplied titles.

/// Characters that cannot appear in filenames on the host filesystems.
const ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Strip filesystem-illegal characters from a title and trim whitespace.
///
/// Total and deterministic: never fails, and sanitizing an already
/// sanitized string returns it unchanged. Empty or all-illegal input yields
/// an empty string; callers fall back to a generated placeholder name.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_illegal_characters() {
        assert_eq!(sanitize_title(r#"a\b/c:d*e?f"g<h>i|j"#), "abcdefghij");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(sanitize_title("  video title  "), "video title");
        // Whitespace exposed by removal is trimmed too.
        assert_eq!(sanitize_title("? title ?"), "title");
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize_title("some: title? with|chars");
        assert_eq!(sanitize_title(&once), once);
    }

    #[test]
    fn test_no_illegal_chars_survive() {
        let out = sanitize_title(r#"<<*??>>a|b:c"d"#);
        assert!(out.chars().all(|c| !ILLEGAL_CHARS.contains(&c)));
    }

    #[test]
    fn test_degenerate_inputs_yield_empty() {
        assert_eq!(sanitize_title(""), "");
        assert_eq!(sanitize_title(r#"\/:*?"<>|"#), "");
        assert_eq!(sanitize_title("   "), "");
    }

    #[test]
    fn test_preserves_unicode() {
        assert_eq!(sanitize_title("【测试】视频标题"), "【测试】视频标题");
    }
}
