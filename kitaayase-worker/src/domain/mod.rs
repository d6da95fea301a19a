//! Domain types for the line status service.
//!
//! These are the stable, client-facing shapes. They carry no knowledge of
//! the upstream wire format.

mod railway_status;
mod train_state;

pub use railway_status::{FALLBACK_TEXT, RAILWAY_SLUG, RailwayStatus};
pub use train_state::{NORMAL_MARKER, SUSPENDED_MARKER, TrainState};
