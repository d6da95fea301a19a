//! Turns a normalized status into the cacheable HTTP response.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};

use crate::cache::CachedResponse;
use crate::domain::RailwayStatus;

/// `Cache-Control` for status responses. The edge cache honours the same
/// `max-age` when storing them.
pub const STATUS_CACHE_CONTROL: &str = "public, max-age=30";

/// Build the success response: pretty-printed JSON with CORS and cache
/// headers.
pub fn status_response(status: &RailwayStatus) -> Result<CachedResponse, serde_json::Error> {
    let body = serde_json::to_string_pretty(status)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(STATUS_CACHE_CONTROL),
    );

    Ok(CachedResponse::new(StatusCode::OK, headers, body))
}
