//! Optional memoization of fetched story documents.
//!
//! The default policy stores nothing and hands data straight back. The
//! in-memory policy keys entries by (user, slug, kind) and may expire them
//! after a TTL. Identity validation never reads from here.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::url_kind::UrlKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    PassThrough,
    /// `ttl: None` keeps entries for the life of the client.
    Memory { ttl: Option<Duration> },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub user: String,
    pub slug: String,
    pub kind: UrlKind,
}

impl CacheKey {
    pub fn new(user: &str, slug: &str, kind: UrlKind) -> Self {
        Self {
            user: user.to_string(),
            slug: slug.to_string(),
            kind,
        }
    }
}

#[derive(Debug)]
struct Entry {
    body: String,
    stored_at: Instant,
}

#[derive(Debug, Default)]
pub struct ResponseCache {
    policy: CachePolicy,
    entries: HashMap<CacheKey, Entry>,
}

impl ResponseCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns a live entry, dropping it first if it has expired.
    pub fn lookup(&mut self, key: &CacheKey) -> Option<String> {
        let ttl = match self.policy {
            CachePolicy::PassThrough => return None,
            CachePolicy::Memory { ttl } => ttl,
        };
        let expired = self
            .entries
            .get(key)
            .map(|e| ttl.is_some_and(|ttl| e.stored_at.elapsed() >= ttl))?;
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| e.body.clone())
    }

    /// Records `body` under `key` (if the policy keeps anything) and returns it.
    /// Expired entries for other keys are swept on the way.
    pub fn store(&mut self, key: CacheKey, body: String) -> String {
        if let CachePolicy::Memory { ttl } = self.policy {
            if let Some(ttl) = ttl {
                self.entries.retain(|_, e| e.stored_at.elapsed() < ttl);
            }
            self.entries.insert(
                key,
                Entry {
                    body: body.clone(),
                    stored_at: Instant::now(),
                },
            );
        }
        body
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
