//! Tokyo Metro Chiyoda line status service.
//!
//! Proxies the ODPT train information API, normalizes its answer into a
//! small stable JSON shape and serves it through a short-lived shared cache.

pub mod cache;
pub mod config;
pub mod domain;
pub mod normalize;
pub mod odpt;
pub mod web;
