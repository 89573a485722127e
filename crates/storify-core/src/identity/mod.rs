//! Story identity: the canonical (user, slug) pair and the input shapes that
//! normalize to it.
//!
//! Normalization is all-or-nothing. A candidate pair is only committed by the
//! client after remote validation succeeds; see [`crate::story::StoryClient`].

mod parse;

pub use parse::{matches_canonical_url, parse_story_url};

use serde_json::{Map, Value};

/// Canonical reference to a remote story plus its validation flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub slug: String,
    pub validated: bool,
}

impl Identity {
    /// True when either half of the pair is missing.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() || self.slug.is_empty()
    }

    /// Drops the pair and the validation flag.
    pub fn clear(&mut self) {
        self.user.clear();
        self.slug.clear();
        self.validated = false;
    }
}

/// Anything a caller can hand to `StoryClient::set_story`.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryInput {
    /// Structured pair.
    Pair { user: String, slug: String },
    /// Loosely-typed key/value bag; `user` and `slug` are looked up by name.
    Fields(Map<String, Value>),
    /// A canonical story URL, e.g. `https://storify.com/alice/MY-STORY`.
    Url(String),
    /// Any other shape; normalizes to an empty identity.
    Empty,
}

impl StoryInput {
    pub fn pair(user: impl Into<String>, slug: impl Into<String>) -> Self {
        StoryInput::Pair {
            user: user.into(),
            slug: slug.into(),
        }
    }

    /// Extracts the candidate (user, slug). Unusable parts come back empty.
    pub fn candidate(&self) -> (String, String) {
        match self {
            StoryInput::Pair { user, slug } => (user.clone(), slug.clone()),
            StoryInput::Fields(map) => (field_str(map, "user"), field_str(map, "slug")),
            StoryInput::Url(url) => parse_story_url(url).unwrap_or_default(),
            StoryInput::Empty => (String::new(), String::new()),
        }
    }
}

fn field_str(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl From<&str> for StoryInput {
    fn from(url: &str) -> Self {
        StoryInput::Url(url.to_string())
    }
}

impl From<String> for StoryInput {
    fn from(url: String) -> Self {
        StoryInput::Url(url)
    }
}

impl<U: Into<String>, S: Into<String>> From<(U, S)> for StoryInput {
    fn from((user, slug): (U, S)) -> Self {
        StoryInput::pair(user, slug)
    }
}

impl From<Map<String, Value>> for StoryInput {
    fn from(map: Map<String, Value>) -> Self {
        StoryInput::Fields(map)
    }
}

impl From<Value> for StoryInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => StoryInput::Fields(map),
            Value::String(url) => StoryInput::Url(url),
            _ => StoryInput::Empty,
        }
    }
}
