//! Story client: identity normalization, the remote validation gate, URL
//! resolution and content accessors.
//!
//! Every accessor re-runs validation against the service before it returns
//! anything; there is no trusted `validated` state across calls.

mod metadata;

pub use metadata::StoryMetadata;

use serde_json::Value;

use crate::cache::{CacheKey, CachePolicy, ResponseCache};
use crate::error::{Result, StorifyError};
use crate::identity::{matches_canonical_url, Identity, StoryInput};
use crate::transport::{CurlTransport, Transport};
use crate::url_kind::UrlKind;

/// Facade over one story. Mutation and validation take `&mut self`, so a
/// shared client needs external locking around both.
pub struct StoryClient<T: Transport = CurlTransport> {
    transport: T,
    identity: Identity,
    cache: ResponseCache,
}

impl<T: Transport> StoryClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            identity: Identity::default(),
            cache: ResponseCache::default(),
        }
    }

    /// Creates a client and sets its story in one step.
    pub fn open(transport: T, input: impl Into<StoryInput>) -> Result<Self> {
        let mut client = Self::new(transport);
        client.set_story(input)?;
        Ok(client)
    }

    pub fn with_cache(mut self, policy: CachePolicy) -> Self {
        self.cache = ResponseCache::new(policy);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Last validation outcome, without a network call.
    pub fn is_validated(&self) -> bool {
        self.identity.validated
    }

    /// Normalizes `input` to a (user, slug) candidate and commits it only if
    /// remote validation succeeds. The previous identity and any cached
    /// documents are dropped either way.
    pub fn set_story(&mut self, input: impl Into<StoryInput>) -> Result<()> {
        self.identity.clear();
        self.cache.clear();

        let input: StoryInput = input.into();
        let (user, slug) = input.candidate();
        if !self.remote_exists(&user, &slug) {
            tracing::debug!("rejected story candidate user={:?} slug={:?}", user, slug);
            return Err(StorifyError::InvalidIdentity);
        }

        self.identity.user = user;
        self.identity.slug = slug;
        self.identity.validated = true;
        Ok(())
    }

    /// Validates the stored identity against the service.
    pub fn is_valid(&mut self) -> bool {
        self.is_valid_pair(None, None)
    }

    /// Validates an explicit pair; missing or empty parts fall back to the
    /// stored identity. The validation flag only follows checks of the stored
    /// pair, and stays false while the stored pair is empty.
    pub fn is_valid_pair(&mut self, user: Option<&str>, slug: Option<&str>) -> bool {
        let user = user
            .filter(|u| !u.is_empty())
            .unwrap_or(self.identity.user.as_str())
            .to_string();
        let slug = slug
            .filter(|s| !s.is_empty())
            .unwrap_or(self.identity.slug.as_str())
            .to_string();

        let valid = self.remote_exists(&user, &slug);
        if self.identity.is_empty() {
            self.identity.validated = false;
        } else if user == self.identity.user && slug == self.identity.slug {
            self.identity.validated = valid;
        }
        valid
    }

    fn remote_exists(&self, user: &str, slug: &str) -> bool {
        if user.is_empty() || slug.is_empty() {
            return false;
        }
        // Both parts must survive embedding in a story URL.
        if !matches_canonical_url(&UrlKind::Story.render(user, slug)) {
            tracing::debug!("story URL for user={:?} slug={:?} is not canonical", user, slug);
            return false;
        }
        match self.query(&UrlKind::Json.render(user, slug)) {
            Ok(body) => !body.is_empty(),
            Err(_) => false,
        }
    }

    fn ensure_valid(&mut self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(StorifyError::NotValidated)
        }
    }

    pub fn user(&mut self) -> Result<&str> {
        if !self.is_valid() {
            return Err(StorifyError::InvalidIdentity);
        }
        Ok(&self.identity.user)
    }

    pub fn slug(&mut self) -> Result<&str> {
        if !self.is_valid() {
            return Err(StorifyError::InvalidIdentity);
        }
        Ok(&self.identity.slug)
    }

    /// Resolves a URL kind by name (case-insensitive). Unknown names fail
    /// before the identity is looked at.
    pub fn resolve(&mut self, kind: &str) -> Result<String> {
        let kind: UrlKind = kind.parse()?;
        self.url(kind)
    }

    pub fn url(&mut self, kind: UrlKind) -> Result<String> {
        self.ensure_valid()?;
        Ok(kind.render(&self.identity.user, &self.identity.slug))
    }

    /// One GET against `url`, gated on a valid identity.
    pub fn fetch_raw(&mut self, url: &str) -> Result<String> {
        self.ensure_valid()?;
        self.query(url)
    }

    /// The story's `content` document.
    pub fn fetch_json(&mut self) -> Result<Value> {
        self.ensure_valid()?;
        let body = self.fetch_kind(UrlKind::Json)?;
        metadata::story_content(&body)
    }

    pub fn fetch_metadata(&mut self) -> Result<StoryMetadata> {
        let content = self.fetch_json()?;
        Ok(StoryMetadata::project(
            &content,
            &self.identity.user,
            &self.identity.slug,
        ))
    }

    /// The minimal HTML rendering of the story.
    pub fn fetch_html(&mut self) -> Result<String> {
        self.ensure_valid()?;
        let body = self.fetch_kind(UrlKind::Minimal)?;
        if body.is_empty() {
            return Err(StorifyError::BadRemoteResponse("empty HTML body".to_string()));
        }
        Ok(body)
    }

    fn fetch_kind(&mut self, kind: UrlKind) -> Result<String> {
        let key = CacheKey::new(&self.identity.user, &self.identity.slug, kind);
        if let Some(body) = self.cache.lookup(&key) {
            tracing::debug!("cache hit for {} {}/{}", kind, key.user, key.slug);
            return Ok(body);
        }
        let body = self.query(&kind.render(&key.user, &key.slug))?;
        Ok(self.cache.store(key, body))
    }

    fn query(&self, url: &str) -> Result<String> {
        tracing::info!("Request {}", url);
        match self.transport.get(url) {
            Ok(body) => {
                tracing::debug!("Response: {}", body);
                Ok(body)
            }
            Err(source) => {
                tracing::error!(severity = "alert", "request {} failed: {}", url, source);
                Err(StorifyError::TransportFailure {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}
