//! Web layer for the line status service.
//!
//! A single handler serves every request: cache lookup, upstream fetch,
//! normalization, response.

mod dto;
mod responder;
mod routes;
mod state;

pub use dto::*;
pub use responder::{STATUS_CACHE_CONTROL, status_response};
pub use routes::{AppError, create_router};
pub use state::AppState;
