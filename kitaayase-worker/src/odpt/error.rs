//! ODPT client error types.

/// Errors from fetching train information.
#[derive(Debug, thiserror::Error)]
pub enum OdptError {
    /// Transport failure while sending the request or reading the body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
}
