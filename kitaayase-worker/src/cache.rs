//! Shared response cache.
//!
//! Finalized HTTP responses are stored keyed by the inbound request (method
//! plus full URL) and served back unmodified on a hit. Each entry lives for
//! the `max-age` of its own `Cache-Control` header, independent of the
//! capacity bound.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use moka::Expiry;
use moka::future::Cache as MokaCache;

/// Cache key: the request method and its full URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: Method,
    url: String,
}

impl CacheKey {
    /// Build a key from request parts.
    ///
    /// Origin-form URIs are qualified with the `Host` header so requests for
    /// different hosts do not share entries.
    pub fn from_request(method: &Method, headers: &HeaderMap, uri: &Uri) -> Self {
        let path_and_query = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");

        let url = match (uri.authority(), headers.get(header::HOST)) {
            (Some(authority), _) => format!("{authority}{path_and_query}"),
            (None, Some(host)) => {
                format!("{}{path_and_query}", String::from_utf8_lossy(host.as_bytes()))
            }
            (None, None) => path_and_query.to_string(),
        };

        Self {
            method: method.clone(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A finalized response, stored by value.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CachedResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Freshness lifetime from `Cache-Control`.
    ///
    /// `None` when the header is missing, has no `max-age`, or forbids shared
    /// storage (`no-store`, `private`).
    pub fn max_age(&self) -> Option<Duration> {
        let value = self.headers.get(header::CACHE_CONTROL)?.to_str().ok()?;
        parse_max_age(value)
    }
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}

/// Parse the shared-cache lifetime out of a `Cache-Control` value.
fn parse_max_age(value: &str) -> Option<Duration> {
    let mut max_age = None;

    for directive in value.split(',').map(str::trim) {
        let lower = directive.to_ascii_lowercase();
        if lower == "no-store" || lower == "private" {
            return None;
        }
        if let Some(secs) = lower.strip_prefix("max-age=") {
            max_age = secs.trim_matches('"').parse::<u64>().ok();
        }
    }

    max_age.filter(|secs| *secs > 0).map(Duration::from_secs)
}

/// Request-keyed response cache.
///
/// Implementations must be safe to share between concurrent requests.
/// Concurrent writers for the same key are allowed; the last write wins.
pub trait ResponseCache: Send + Sync {
    /// Look up a fresh entry.
    fn get<'a>(&'a self, key: &'a CacheKey) -> BoxFuture<'a, Option<CachedResponse>>;

    /// Store a response. Responses without a usable `max-age` are not stored.
    fn put(&self, key: CacheKey, response: CachedResponse) -> BoxFuture<'_, ()>;
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: 1000 }
    }
}

/// Expires each entry after its own `max-age`.
struct MaxAgeExpiry;

impl Expiry<CacheKey, CachedResponse> for MaxAgeExpiry {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &CachedResponse,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.max_age()
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &CachedResponse,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.max_age()
    }
}

/// In-process edge cache backed by `moka`.
#[derive(Clone)]
pub struct EdgeCache {
    entries: MokaCache<CacheKey, CachedResponse>,
}

impl EdgeCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(MaxAgeExpiry)
            .build();

        Self { entries }
    }
}

impl ResponseCache for EdgeCache {
    fn get<'a>(&'a self, key: &'a CacheKey) -> BoxFuture<'a, Option<CachedResponse>> {
        Box::pin(self.entries.get(key))
    }

    fn put(&self, key: CacheKey, response: CachedResponse) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if response.max_age().is_none() {
                tracing::debug!(url = key.url(), "response not cacheable, skipping store");
                return;
            }
            self.entries.insert(key, response).await;
        })
    }
}
