//! Canonical story URL pattern.

use once_cell::sync::Lazy;
use regex::Regex;

/// `https://[www.]storify.com/<user>/<SLUG>[/]`, ASCII case-insensitive.
/// Unicode case folding is off so that e.g. KELVIN SIGN never matches `k`.
static STORY_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)^https://(?:www\.)?storify\.com/([A-Za-z0-9_]+)/([A-Z0-9-]+)/?$")
        .expect("story URL pattern compiles")
});

/// True if `url` is a well-formed canonical story URL.
pub fn matches_canonical_url(url: &str) -> bool {
    STORY_URL_RE.is_match(url)
}

/// Extracts (user, slug) from a canonical story URL.
pub fn parse_story_url(url: &str) -> Option<(String, String)> {
    let caps = STORY_URL_RE.captures(url)?;
    let user = caps.get(1)?.as_str().to_string();
    let slug = caps.get(2)?.as_str().to_string();
    Some((user, slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_www() {
        assert_eq!(
            parse_story_url("https://storify.com/alice/MY-STORY"),
            Some(("alice".to_string(), "MY-STORY".to_string()))
        );
        assert_eq!(
            parse_story_url("https://www.storify.com/bob_2/story-1/"),
            Some(("bob_2".to_string(), "story-1".to_string()))
        );
    }

    #[test]
    fn case_insensitive() {
        assert!(matches_canonical_url("HTTPS://STORIFY.COM/Alice/my-story"));
    }

    #[test]
    fn rejects_wrong_scheme_host_or_shape() {
        for url in [
            "http://storify.com/alice/x",
            "https://storify.net/alice/x",
            "https://storifyxcom/alice/x",
            "https://api.storify.com/alice/x",
            "https://storify.com/alice",
            "https://storify.com/alice/x/edit",
            "https://storify.com/al-ice/x",
            "https://storify.com/alice/my_story",
            "https://storify.com/alice/x//",
            "not-a-url",
            "",
        ] {
            assert!(!matches_canonical_url(url), "{url}");
            assert!(parse_story_url(url).is_none(), "{url}");
        }
    }

    #[test]
    fn rejects_injected_segments() {
        assert!(!matches_canonical_url("https://storify.com/alice/x?y=1"));
        assert!(!matches_canonical_url("https://storify.com/alice/x y"));
        assert!(!matches_canonical_url("https://storify.com/alice/x\n"));
    }

    #[test]
    fn rejects_unicode_case_folds() {
        for url in [
            "https://storify.com/alice/MY-\u{212A}\u{17F}",
            "https://storify.com/\u{212A}elvin/MY-STORY",
            "https://\u{17F}torify.com/alice/MY-STORY",
            "https://storify.com/alice/MY-ST\u{F6}RY",
        ] {
            assert!(!matches_canonical_url(url), "{url}");
            assert!(parse_story_url(url).is_none(), "{url}");
        }
    }
}
