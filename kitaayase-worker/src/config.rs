//! Runtime configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::odpt::{DEFAULT_BASE_URL, OdptConfig};

/// Consumer key for the ODPT API.
pub const API_KEY_VAR: &str = "TOKYO_METRO_API_KEY";
/// Override for the ODPT base URL.
pub const BASE_URL_VAR: &str = "ODPT_BASE_URL";
/// Address to listen on.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
/// Upper bound on cached responses.
pub const CACHE_MAX_ENTRIES_VAR: &str = "CACHE_MAX_ENTRIES";
/// Upstream request timeout in seconds.
pub const UPSTREAM_TIMEOUT_VAR: &str = "UPSTREAM_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8787));

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub odpt: OdptConfig,
    pub cache: CacheConfig,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// A missing API key is not an error: the upstream rejects the request
    /// and the failure is reported per request.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR).unwrap_or_else(|| {
            tracing::warn!("{API_KEY_VAR} not set. Upstream calls will fail.");
            String::new()
        });

        let mut odpt = OdptConfig::new(api_key)
            .with_base_url(lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()));

        if let Some(secs) = parse_var::<u64>(&lookup, UPSTREAM_TIMEOUT_VAR)? {
            odpt = odpt.with_timeout(Duration::from_secs(secs));
        }

        let bind_addr =
            parse_var::<SocketAddr>(&lookup, BIND_ADDR_VAR)?.unwrap_or(DEFAULT_BIND_ADDR);

        let mut cache = CacheConfig::default();
        if let Some(max_capacity) = parse_var::<u64>(&lookup, CACHE_MAX_ENTRIES_VAR)? {
            cache.max_capacity = max_capacity;
        }

        Ok(Self {
            bind_addr,
            odpt,
            cache,
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        })
}
