//! Upstream record → normalized line status.
//!
//! Pure: the current time is passed in, so output depends only on inputs.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{FALLBACK_TEXT, RAILWAY_SLUG, RailwayStatus, TrainState};
use crate::odpt::TrainInformationPayload;

/// Normalize a validated payload.
///
/// With no usable record the line is reported as operating normally. With a
/// record, empty free text falls back to [`FALLBACK_TEXT`] and a missing
/// `dc:date` falls back to `now`.
pub fn normalize(payload: &TrainInformationPayload, now: DateTime<Utc>) -> RailwayStatus {
    let Some(record) = payload.record() else {
        return RailwayStatus::fallback(iso_timestamp(now));
    };

    let text = match record.text_ja() {
        "" => FALLBACK_TEXT.to_string(),
        text => text.to_string(),
    };

    let updated_at = record
        .date
        .clone()
        .unwrap_or_else(|| iso_timestamp(now));

    RailwayStatus {
        railway: RAILWAY_SLUG,
        state: TrainState::classify(record.status_ja()),
        text,
        updated_at,
    }
}

/// Format a time as ISO 8601 UTC with millisecond precision, e.g.
/// `2025-03-01T00:00:00.000Z`.
pub fn iso_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
