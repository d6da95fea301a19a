//! Upstream capability used by the web layer.

use futures::future::BoxFuture;

use super::error::OdptError;

/// Something that can produce a raw `odpt:TrainInformation` body.
///
/// [`super::OdptClient`] talks to the real API; [`super::MockSource`] serves
/// canned responses in tests.
pub trait TrainInformationSource: Send + Sync {
    /// Fetch the raw response body. A non-success status is an error.
    fn fetch(&self) -> BoxFuture<'_, Result<String, OdptError>>;
}
