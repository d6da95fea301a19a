//! ODPT (Open Data for Public Transportation) client.
//!
//! This module fetches `odpt:TrainInformation` for the Tokyo Metro Chiyoda
//! line and validates the response at the boundary.
//!
//! Key characteristics of the API:
//! - Authentication is a consumer key in the query string
//! - Responses are JSON arrays of records; every field may be missing
//! - Text fields are multilingual objects (`{"ja": ..., "en": ...}`)

mod client;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, OdptClient, OdptConfig, RAILWAY_ID, USER_AGENT};
pub use error::OdptError;
pub use mock::MockSource;
pub use source::TrainInformationSource;
pub use types::{LocalizedText, TrainInformation, TrainInformationPayload};
