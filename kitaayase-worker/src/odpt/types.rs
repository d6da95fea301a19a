//! ODPT `odpt:TrainInformation` response DTOs.
//!
//! The upstream publishes no schema we can rely on. Every field is optional,
//! and the whole body is parsed once into [`TrainInformationPayload`] so the
//! rest of the pipeline branches on an explicit variant.

use serde::Deserialize;
use serde_json::Value;

/// One element of the `odpt:TrainInformation` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrainInformation {
    /// Short operating status, e.g. "平常運転" or "運転見合わせ".
    #[serde(rename = "odpt:trainInformationStatus")]
    pub status: Option<LocalizedText>,

    /// Free-text description of the current situation.
    #[serde(rename = "odpt:trainInformationText")]
    pub text: Option<LocalizedText>,

    /// When the operator last updated this record (ISO 8601).
    #[serde(rename = "dc:date")]
    pub date: Option<String>,
}

impl TrainInformation {
    /// Japanese status text, empty if absent.
    pub fn status_ja(&self) -> &str {
        self.status.as_ref().and_then(|t| t.ja.as_deref()).unwrap_or("")
    }

    /// Japanese free text, empty if absent.
    pub fn text_ja(&self) -> &str {
        self.text.as_ref().and_then(|t| t.ja.as_deref()).unwrap_or("")
    }
}

/// A multilingual string object (`{"ja": "...", "en": "..."}`).
///
/// Only the Japanese rendering is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocalizedText {
    pub ja: Option<String>,
}

/// The upstream body after boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainInformationPayload {
    /// The first array element, in the expected shape.
    Record(TrainInformation),

    /// A well-formed, empty array.
    Empty,

    /// Anything else. The reason is kept for logging.
    Unrecognized(String),
}

impl TrainInformationPayload {
    /// Parse a raw response body.
    ///
    /// Never fails: bodies that are not JSON, not an array, or whose first
    /// element has the wrong shape become [`TrainInformationPayload::Unrecognized`].
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(e) => TrainInformationPayload::Unrecognized(format!("invalid JSON: {e}")),
        }
    }

    /// Validate an already-decoded JSON value.
    pub fn from_value(value: Value) -> Self {
        let Value::Array(records) = value else {
            return TrainInformationPayload::Unrecognized(format!(
                "expected an array, got {}",
                json_kind(&value)
            ));
        };

        let Some(first) = records.into_iter().next() else {
            return TrainInformationPayload::Empty;
        };

        match serde_json::from_value::<TrainInformation>(first) {
            Ok(record) => TrainInformationPayload::Record(record),
            Err(e) => TrainInformationPayload::Unrecognized(format!("unexpected record shape: {e}")),
        }
    }

    /// Returns the record, if one was recognized.
    pub fn record(&self) -> Option<&TrainInformation> {
        match self {
            TrainInformationPayload::Record(record) => Some(record),
            _ => None,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
