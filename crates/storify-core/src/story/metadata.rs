//! Decoding the story JSON document and projecting its metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StorifyError};

/// Curated subset of a story's fields. Absent or non-string fields are `None`
/// (serialized as `null`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub thumbnail: Option<String>,
    pub shortlink: Option<String>,
    pub user: String,
    pub slug: String,
}

impl StoryMetadata {
    pub fn project(content: &Value, user: &str, slug: &str) -> Self {
        let field = |name: &str| {
            content
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            title: field("title"),
            description: field("description"),
            status: field("status"),
            thumbnail: field("thumbnail"),
            shortlink: field("shortlink"),
            user: user.to_string(),
            slug: slug.to_string(),
        }
    }
}

/// The API marks success with `"code": "ok"` or `"code": 200`.
fn is_request_ok(doc: &Value) -> bool {
    match doc.get("code") {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("ok"),
        Some(Value::Number(n)) => n.as_u64() == Some(200),
        _ => false,
    }
}

/// Parses a story document and returns its nested `content`.
pub(crate) fn story_content(body: &str) -> Result<Value> {
    let doc: Value = serde_json::from_str(body)
        .map_err(|e| StorifyError::BadRemoteResponse(format!("invalid JSON: {e}")))?;
    if !is_request_ok(&doc) {
        return Err(StorifyError::BadRemoteResponse(
            "missing ok status marker".to_string(),
        ));
    }
    match doc {
        Value::Object(mut map) => map
            .remove("content")
            .ok_or_else(|| StorifyError::BadRemoteResponse("missing content".to_string())),
        _ => Err(StorifyError::BadRemoteResponse(
            "document is not an object".to_string(),
        )),
    }
}
