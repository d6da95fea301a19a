//! The normalized status entity served to clients.

use serde::Serialize;

use super::TrainState;

/// Railway slug reported in every status.
pub const RAILWAY_SLUG: &str = "chiyoda";

/// Text served when the operator gives no free-text description.
pub const FALLBACK_TEXT: &str = "現在、平常どおり運転しています。";

/// Normalized line status.
///
/// Serializes to `{"railway", "state", "text", "updatedAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RailwayStatus {
    pub railway: &'static str,
    pub state: TrainState,
    pub text: String,
    /// ISO-8601 timestamp, either the operator's or the time of normalization.
    pub updated_at: String,
}

impl RailwayStatus {
    /// The status used when the operator returned no usable record.
    pub fn fallback(updated_at: impl Into<String>) -> Self {
        Self {
            railway: RAILWAY_SLUG,
            state: TrainState::Normal,
            text: FALLBACK_TEXT.to_string(),
            updated_at: updated_at.into(),
        }
    }
}
