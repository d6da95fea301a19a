//! ODPT HTTP client.
//!
//! Fetches `odpt:TrainInformation` for the Chiyoda line. The body is returned
//! as raw text; interpretation happens in [`super::TrainInformationPayload`].

use std::fmt;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use super::error::OdptError;
use super::source::TrainInformationSource;

/// Default base URL for the ODPT v4 API.
pub const DEFAULT_BASE_URL: &str = "https://api.odpt.org/api/v4";

/// Railway identifier queried on every request.
pub const RAILWAY_ID: &str = "odpt.Railway:TokyoMetro.Chiyoda";

/// User agent sent to the API.
pub const USER_AGENT: &str = "kitaayase-worker/1.0";

/// Configuration for the ODPT client.
#[derive(Clone)]
pub struct OdptConfig {
    /// Consumer key, sent as the `acl:consumerKey` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production ODPT)
    pub base_url: String,
    /// Request timeout. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl OdptConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for OdptConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdptConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// ODPT API client.
#[derive(Clone)]
pub struct OdptClient {
    http: reqwest::Client,
    url: String,
}

impl OdptClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OdptConfig) -> Result<Self, OdptError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            url: train_information_url(&config.base_url, &config.api_key),
        })
    }

    /// Fetch the raw train information body.
    ///
    /// Non-success statuses become [`OdptError::Status`] carrying the
    /// upstream body verbatim.
    pub async fn fetch_train_information(&self) -> Result<String, OdptError> {
        // The URL carries the consumer key, so keep it out of error messages.
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| OdptError::Http(e.without_url()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OdptError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| OdptError::Http(e.without_url()))
    }
}

impl fmt::Debug for OdptClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdptClient").finish_non_exhaustive()
    }
}

impl TrainInformationSource for OdptClient {
    fn fetch(&self) -> BoxFuture<'_, Result<String, OdptError>> {
        Box::pin(self.fetch_train_information())
    }
}

/// Build the fixed query URL.
///
/// Parameters are written literally: the API expects `odpt:` and `acl:`
/// prefixes unescaped.
fn train_information_url(base_url: &str, api_key: &str) -> String {
    format!(
        "{}/odpt:TrainInformation?odpt:railway={}&acl:consumerKey={}",
        base_url.trim_end_matches('/'),
        RAILWAY_ID,
        api_key
    )
}
