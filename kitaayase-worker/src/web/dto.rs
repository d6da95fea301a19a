//! Error bodies returned to clients.

use serde::Serialize;

/// Message reported when the upstream answers with a non-success status.
pub const UPSTREAM_ERROR: &str = "Tokyo Metro API error";

/// Message reported when the upstream could not be reached.
pub const UPSTREAM_UNREACHABLE: &str = "Tokyo Metro API unreachable";

/// Body for a non-success upstream status.
#[derive(Debug, Serialize)]
pub struct UpstreamErrorResponse {
    pub error: &'static str,
    /// Upstream status code
    pub status: u16,
    /// Upstream body, verbatim
    pub body: String,
}

/// Body for failures that never produced an upstream response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
