//! Response DTOs for the snow finder API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::geo::{GeoPoint, NearbySnow, ProximityResult};
use crate::models::{City, SnowRegion};

/// Response body for GET /regions and POST /regions/refresh
#[derive(Debug, Clone, Serialize)]
pub struct RegionsResponse {
    /// Regions where it is currently snowing
    pub regions: Vec<SnowRegion>,
    pub count: usize,
    /// True when the upstream source failed and `regions` is the last cached copy
    pub offline: bool,
}

impl RegionsResponse {
    pub fn new(regions: Vec<SnowRegion>, offline: bool) -> Self {
        Self {
            count: regions.len(),
            regions,
            offline,
        }
    }
}

/// Response body for GET /nearby
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyResponse {
    pub origin: GeoPoint,
    pub radius_km: f64,
    pub results: Vec<ProximityResult>,
    /// Closest snowing city anywhere, set only when `results` is empty
    pub nearest: Option<ProximityResult>,
}

impl NearbyResponse {
    pub fn new(origin: GeoPoint, radius_km: f64, nearby: NearbySnow) -> Self {
        Self {
            origin,
            radius_km,
            results: nearby.results,
            nearest: nearby.nearest,
        }
    }
}

/// Response body for GET /search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub cities: Vec<City>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub refreshes: u64,
    pub refresh_failures: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            refreshes: stats.refreshes,
            refresh_failures: stats.refresh_failures,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
