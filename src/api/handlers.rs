//! API Handlers
//!
//! HTTP request handlers for each snow finder endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::cache::{CacheStore, FileStorage, MemoryStorage, SharedStorage};
use crate::config::Config;
use crate::error::{ApiError, CacheError};
use crate::geo::nearby_or_nearest;
use crate::models::{
    City, HealthResponse, NearbyQuery, NearbyResponse, RegionsResponse, SearchQuery, SearchResponse,
    StatsResponse,
};
use crate::services::{filter_snowing_cities, search_cities, FileSnowSource, SnowDataSource, SnowService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-backed region service
    pub service: Arc<SnowService<SharedStorage>>,
    /// Radius used when `/nearby` omits one
    pub radius_km: f64,
}

impl AppState {
    pub fn new(service: SnowService<SharedStorage>, radius_km: f64) -> Self {
        Self {
            service: Arc::new(service),
            radius_km,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses file storage when `storage_path` is set, memory otherwise. The
    /// region source is the JSON snapshot at `snow_data_path`.
    pub fn from_config(config: &Config) -> Result<Self, CacheError> {
        let storage: SharedStorage = match &config.storage_path {
            Some(path) => Arc::new(FileStorage::open(path)?),
            None => Arc::new(MemoryStorage::new()),
        };
        let source: Arc<dyn SnowDataSource> = Arc::new(FileSnowSource::new(&config.snow_data_path));
        let cache = CacheStore::new(storage, config.cache_ttl_ms);

        Ok(Self::new(SnowService::new(cache, source), config.nearby_radius_km))
    }
}

fn unavailable(err: anyhow::Error) -> ApiError {
    ApiError::Unavailable(format!("{:#}", err))
}

/// Handler for GET /regions
///
/// Returns the regions where it is snowing right now.
pub async fn regions_handler(State(state): State<AppState>) -> Result<Json<RegionsResponse>, ApiError> {
    let snapshot = state.service.regions().await.map_err(unavailable)?;
    let snowing = filter_snowing_cities(&snapshot.regions);

    Ok(Json(RegionsResponse::new(snowing, snapshot.offline)))
}

/// Handler for POST /regions/refresh
///
/// Bypasses the cache. Answers 503 only when the source fails and nothing
/// was ever cached.
pub async fn refresh_handler(State(state): State<AppState>) -> Result<Json<RegionsResponse>, ApiError> {
    let snapshot = state.service.refresh_regions().await.map_err(unavailable)?;
    let snowing = filter_snowing_cities(&snapshot.regions);

    Ok(Json(RegionsResponse::new(snowing, snapshot.offline)))
}

/// Handler for GET /nearby
///
/// Snowing cities within the radius, nearest first. When none are in range
/// the closest snowing city anywhere is reported as `nearest`.
pub async fn nearby_handler(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let origin = query.validate().map_err(ApiError::InvalidRequest)?;
    let radius_km = query.radius.unwrap_or(state.radius_km);

    let snapshot = state.service.regions().await.map_err(unavailable)?;
    let nearby = nearby_or_nearest(origin, &snapshot.regions, radius_km);

    Ok(Json(NearbyResponse::new(origin, radius_km, nearby)))
}

/// Handler for GET /search
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let snapshot = state.service.regions().await.map_err(unavailable)?;
    let cities: Vec<City> = snapshot.regions.iter().map(City::from).collect();

    Ok(Json(SearchResponse {
        cities: search_cities(&query.keyword, &cities),
        keyword: query.keyword,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.service.cache().stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
