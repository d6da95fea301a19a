//! Operating state of a railway line.

use std::fmt;

use serde::Serialize;

/// Marker the operator uses in status text for normal operation ("平常").
pub const NORMAL_MARKER: &str = "平常";

/// Marker the operator uses in status text for suspended service ("見合わせ").
pub const SUSPENDED_MARKER: &str = "見合わせ";

/// Coarse operating state reported to clients.
///
/// Derived from the operator's free-form Japanese status text by
/// [`TrainState::classify`].
///
/// # Examples
///
/// ```
/// use kitaayase_worker::domain::TrainState;
///
/// assert_eq!(TrainState::classify("平常運転"), TrainState::Normal);
/// assert_eq!(TrainState::classify("運転見合わせ"), TrainState::Suspended);
/// assert_eq!(TrainState::classify("遅延"), TrainState::Delay);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainState {
    Normal,
    Delay,
    Suspended,
}

impl TrainState {
    /// Classify a raw status text.
    ///
    /// The first matching rule wins: the normal marker, then the suspended
    /// marker. Anything else (including an empty string) is a delay.
    pub fn classify(status_text: &str) -> Self {
        if status_text.contains(NORMAL_MARKER) {
            TrainState::Normal
        } else if status_text.contains(SUSPENDED_MARKER) {
            TrainState::Suspended
        } else {
            TrainState::Delay
        }
    }

    /// Returns the wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainState::Normal => "normal",
            TrainState::Delay => "delay",
            TrainState::Suspended => "suspended",
        }
    }
}

impl fmt::Display for TrainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
