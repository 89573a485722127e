//! Named URL templates for a story.
//!
//! Each kind maps to a fixed template with `%user%` and `%slug%` placeholders
//! (`create` has none). Parsing a kind is case-insensitive.

use std::fmt;
use std::str::FromStr;

use crate::error::StorifyError;

pub const STORIFY_URL: &str = "https://storify.com";

const USER_SLOT: &str = "%user%";
const SLUG_SLOT: &str = "%slug%";

/// Named URL variant of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlKind {
    Story,
    Create,
    Embed,
    Edit,
    Json,
    Minimal,
}

impl UrlKind {
    pub const ALL: [UrlKind; 6] = [
        UrlKind::Story,
        UrlKind::Create,
        UrlKind::Embed,
        UrlKind::Edit,
        UrlKind::Json,
        UrlKind::Minimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UrlKind::Story => "story",
            UrlKind::Create => "create",
            UrlKind::Embed => "embed",
            UrlKind::Edit => "edit",
            UrlKind::Json => "json",
            UrlKind::Minimal => "minimal",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            UrlKind::Story => "https://storify.com/%user%/%slug%",
            UrlKind::Create => "https://storify.com/create",
            UrlKind::Embed => {
                "https://storify.com/%user%/%slug%.js?header=false&sharing=false&border=false"
            }
            UrlKind::Edit => "https://storify.com/%user%/%slug%/edit",
            UrlKind::Json => "https://api.storify.com/v1/stories/%user%/%slug%",
            UrlKind::Minimal => "https://storify.com/%user%/%slug%/minimal",
        }
    }

    /// Substitutes `user` then `slug` into the template.
    ///
    /// No checks happen here; callers gate on a validated identity first.
    pub fn render(self, user: &str, slug: &str) -> String {
        self.template()
            .replacen(USER_SLOT, user, 1)
            .replacen(SLUG_SLOT, slug, 1)
    }
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UrlKind {
    type Err = StorifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        UrlKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| StorifyError::UnknownUrlKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_each_kind() {
        let cases = [
            (UrlKind::Story, "https://storify.com/alice/MY-STORY"),
            (UrlKind::Create, "https://storify.com/create"),
            (
                UrlKind::Embed,
                "https://storify.com/alice/MY-STORY.js?header=false&sharing=false&border=false",
            ),
            (UrlKind::Edit, "https://storify.com/alice/MY-STORY/edit"),
            (UrlKind::Json, "https://api.storify.com/v1/stories/alice/MY-STORY"),
            (UrlKind::Minimal, "https://storify.com/alice/MY-STORY/minimal"),
        ];
        for (kind, expected) in cases {
            assert_eq!(kind.render("alice", "MY-STORY"), expected, "{kind}");
        }
    }

    #[test]
    fn create_ignores_identity() {
        assert_eq!(UrlKind::Create.render("x", "y"), "https://storify.com/create");
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("JSON".parse::<UrlKind>().unwrap(), UrlKind::Json);
        assert_eq!("Minimal".parse::<UrlKind>().unwrap(), UrlKind::Minimal);
        assert_eq!(" story ".parse::<UrlKind>().unwrap(), UrlKind::Story);
    }

    #[test]
    fn parse_unknown() {
        match "rss".parse::<UrlKind>() {
            Err(StorifyError::UnknownUrlKind(k)) => assert_eq!(k, "rss"),
            other => panic!("expected UnknownUrlKind, got {other:?}"),
        }
        assert!("".parse::<UrlKind>().is_err());
    }

    #[test]
    fn templates_share_base() {
        for kind in UrlKind::ALL {
            if kind != UrlKind::Json {
                assert!(kind.template().starts_with(STORIFY_URL));
            }
        }
    }
}
