//! HTTP route handlers.

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::cache::CacheKey;
use crate::normalize::normalize;
use crate::odpt::{OdptError, TrainInformationPayload};

use super::dto::*;
use super::responder::status_response;
use super::state::AppState;

/// Create the application router.
///
/// Every method and path is served by the same handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(line_status)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the Chiyoda line status.
///
/// Cache hit: the stored response, unmodified. Miss: fetch, normalize,
/// store, return. Upstream failures are returned but never stored.
async fn line_status(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key = CacheKey::from_request(&method, &headers, &uri);

    if let Some(cached) = state.cache.get(&key).await {
        tracing::debug!(url = key.url(), "served from cache");
        return Ok(cached.into_response());
    }

    let body = state.source.fetch().await?;

    let payload = TrainInformationPayload::parse(&body);
    if let TrainInformationPayload::Unrecognized(reason) = &payload {
        tracing::warn!(%reason, "unrecognized train information payload, using default status");
    }

    let status = normalize(&payload, Utc::now());
    let response = status_response(&status).map_err(|e| AppError::Internal {
        message: format!("failed to serialize status: {e}"),
    })?;

    state.cache.put(key, response.clone()).await;

    tracing::info!(state = %status.state, "served fresh status");
    Ok(response.into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The upstream answered with a non-success status.
    Upstream { status: u16, body: String },
    /// Transport failure talking to the upstream, including a failed body read.
    Unreachable { message: String },
    Internal { message: String },
}

impl From<OdptError> for AppError {
    fn from(e: OdptError) -> Self {
        match e {
            OdptError::Status { status, body } => AppError::Upstream { status, body },
            OdptError::Http(e) => AppError::Unreachable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream { status, body } => {
                tracing::warn!(status, %body, "upstream returned an error");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &UpstreamErrorResponse {
                        error: UPSTREAM_ERROR,
                        status,
                        body,
                    },
                )
            }
            AppError::Unreachable { message } => {
                tracing::warn!(%message, "upstream unreachable");
                json_error(
                    StatusCode::BAD_GATEWAY,
                    &ErrorResponse {
                        error: UPSTREAM_UNREACHABLE.to_string(),
                        message: Some(message),
                    },
                )
            }
            AppError::Internal { message } => {
                tracing::error!(%message, "internal error");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorResponse {
                        error: message,
                        message: None,
                    },
                )
            }
        }
    }
}

/// Pretty-printed JSON error response. Carries no cache or CORS headers.
fn json_error<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let body = serde_json::to_string_pretty(body)
        .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));

    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}
