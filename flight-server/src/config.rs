//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::SearchConfig;

/// Default dataset location.
pub const DEFAULT_DATA_PATH: &str = "data/flights.metta";

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Error reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Listen address does not parse
    #[error("FLIGHT_SERVER_ADDR: invalid socket address {0:?}")]
    InvalidAddr(String),

    /// Reload interval is not a positive number of seconds
    #[error("FLIGHT_RELOAD_SECS: expected a positive number of seconds, got {0:?}")]
    InvalidReloadInterval(String),
}

/// Configuration for the flight server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Dataset file to load and reload
    pub data_path: PathBuf,
    /// Address to listen on
    pub addr: SocketAddr,
    /// How often to reload the dataset; `None` disables reloading
    pub reload_interval: Option<Duration>,
    /// Search parameters
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// - `FLIGHT_DATA`: dataset path (default `data/flights.metta`)
    /// - `FLIGHT_SERVER_ADDR`: listen address (default `127.0.0.1:3000`)
    /// - `FLIGHT_RELOAD_SECS`: reload interval in seconds (unset: never)
    /// - `FLIGHT_SEARCH_LENIENT`: any value other than `0`/`false` turns off
    ///   strict query handling
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = var("FLIGHT_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let addr_str = var("FLIGHT_SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_str
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr_str.clone()))?;

        let reload_interval = var("FLIGHT_RELOAD_SECS")
            .map(|s| match s.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidReloadInterval(s)),
            })
            .transpose()?;

        let lenient = var("FLIGHT_SEARCH_LENIENT")
            .is_some_and(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false"));

        let search = SearchConfig {
            strict: !lenient,
            ..SearchConfig::default()
        };

        Ok(Self {
            data_path,
            addr,
            reload_interval,
            search,
        })
    }
}
