//! Server settings from the environment. `.env` is loaded by the binary via `dotenvy`.

use crate::error::ConfigError;
use crate::state::DEFAULT_BODY_LIMIT;
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "CONTENT_API_ADDR";
pub const BODY_LIMIT_VAR: &str = "CONTENT_API_BODY_LIMIT";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str = "content_api=info,tower_http=info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Unset or blank variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let addr = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = addr.trim().parse::<SocketAddr>().map_err(|e| ConfigError::InvalidVar {
            name: ADDR_VAR,
            reason: e.to_string(),
        })?;

        let body_limit = match get(BODY_LIMIT_VAR) {
            Some(v) => v.trim().parse::<usize>().map_err(|e| ConfigError::InvalidVar {
                name: BODY_LIMIT_VAR,
                reason: e.to_string(),
            })?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(Self { addr, body_limit })
    }
}
