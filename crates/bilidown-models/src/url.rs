//! Source URL validation.

use std::sync::OnceLock;

use regex::Regex;

static VIDEO_URL_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn video_url_patterns() -> &'static [Regex] {
    VIDEO_URL_PATTERNS.get_or_init(|| {
        [
            // Canonical video page (BV/av paths, with optional query)
            r"^https?://www\.bilibili\.com/video/[a-zA-Z0-9_?=/-]+$",
            // b23.tv short link
            r"^https?://b23\.tv/[a-zA-Z0-9]+$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("invalid URL pattern"))
        .collect()
    })
}

/// Check whether a string is, in its entirety, a recognized video link.
///
/// Accepts only the canonical `www.bilibili.com/video/...` page shape or a
/// `b23.tv` short link. Anything with leading or trailing garbage around an
/// otherwise valid URL is rejected.
pub fn is_valid_video_url(url: &str) -> bool {
    video_url_patterns().iter().any(|p| p.is_match(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_standard_video_urls() {
        assert!(is_valid_video_url(
            "https://www.bilibili.com/video/BV1GJ411x7h7"
        ));
        assert!(is_valid_video_url(
            "http://www.bilibili.com/video/av170001"
        ));
        assert!(is_valid_video_url(
            "https://www.bilibili.com/video/BV1GJ411x7h7?p=2"
        ));
    }

    #[test]
    fn test_accepts_short_links() {
        assert!(is_valid_video_url("https://b23.tv/abc123"));
        assert!(is_valid_video_url("http://b23.tv/XyZ9"));
    }

    #[test]
    fn test_rejects_partial_matches() {
        // An otherwise valid URL embedded in garbage must not pass.
        assert!(!is_valid_video_url(
            "see https://www.bilibili.com/video/BV1GJ411x7h7"
        ));
        assert!(!is_valid_video_url(
            "https://www.bilibili.com/video/BV1GJ411x7h7 trailing"
        ));
    }

    #[test]
    fn test_rejects_other_hosts_and_shapes() {
        assert!(!is_valid_video_url(""));
        assert!(!is_valid_video_url("www.bilibili.com/video/BV1GJ411x7h7"));
        assert!(!is_valid_video_url("https://www.bilibili.com/"));
        assert!(!is_valid_video_url("https://bilibili.com/video/BV1GJ411x7h7"));
        assert!(!is_valid_video_url("https://youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!is_valid_video_url("https://b23.tv/"));
        assert!(!is_valid_video_url("https://b23.tv/abc/def"));
    }
}
