//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::DEFAULT_TTL_MS;
use crate::geo::DEFAULT_RADIUS_KM;

/// Default location of the region snapshot read by the file data source.
pub const DEFAULT_SNOW_DATA_PATH: &str = "data/snow_regions.json";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in milliseconds for cache writes
    pub cache_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Search radius in kilometers when a nearby query omits one
    pub nearby_radius_km: f64,
    /// File backing the cache; in-memory storage when unset
    pub storage_path: Option<PathBuf>,
    /// JSON array of raw region records served as the upstream source
    pub snow_data_path: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Default cache TTL in milliseconds (default: 1800000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `NEARBY_RADIUS_KM` - Default nearby search radius (default: 200)
    /// - `STORAGE_PATH` - Persistent cache file (default: unset, in-memory)
    /// - `SNOW_DATA_PATH` - Region snapshot file (default: data/snow_regions.json)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            nearby_radius_km: parse_var::<f64>("NEARBY_RADIUS_KM")
                .filter(|r| r.is_finite() && *r >= 0.0)
                .unwrap_or(defaults.nearby_radius_km),
            storage_path: env::var("STORAGE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            snow_data_path: env::var("SNOW_DATA_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.snow_data_path),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_ms: DEFAULT_TTL_MS,
            server_port: 3000,
            nearby_radius_km: DEFAULT_RADIUS_KM,
            storage_path: None,
            snow_data_path: PathBuf::from(DEFAULT_SNOW_DATA_PATH),
        }
    }
}
