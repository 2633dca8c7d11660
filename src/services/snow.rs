//! Snow Service
//!
//! Cache-backed access to the region list, plus the list, search and
//! formatting helpers the front end consumes.

use std::sync::Arc;

use chrono::DateTime;
use serde_json::Value;
use tracing::warn;

use crate::cache::{CacheStore, Clock, StorageBackend, SystemClock};
use crate::models::{City, CityDetail, Normalize, SnowForecast, SnowLevel, SnowRegion};
use crate::services::SnowDataSource;

/// Cache key of the national region list
pub const SNOW_REGIONS_CACHE_KEY: &str = "snow_regions";

const CITY_DETAIL_CACHE_PREFIX: &str = "city_detail_";
const FORECAST_CACHE_PREFIX: &str = "forecast_";

/// Cache key of one city's detail view
pub fn city_detail_cache_key(city_id: &str) -> String {
    format!("{}{}", CITY_DETAIL_CACHE_PREFIX, city_id)
}

/// Cache key of one city's forecast list
pub fn forecast_cache_key(city_id: &str) -> String {
    format!("{}{}", FORECAST_CACHE_PREFIX, city_id)
}

// == Region Snapshot ==
/// Region list together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSnapshot {
    pub regions: Vec<SnowRegion>,
    /// True when the source failed and the regions are the last cached copy
    pub offline: bool,
}

// == Snow Service ==
/// Serves regions from cache, refilling from the data source on a miss.
pub struct SnowService<S, C = SystemClock> {
    cache: CacheStore<S, C>,
    source: Arc<dyn SnowDataSource>,
}

impl<S: StorageBackend, C: Clock> SnowService<S, C> {
    pub fn new(cache: CacheStore<S, C>, source: Arc<dyn SnowDataSource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &CacheStore<S, C> {
        &self.cache
    }

    /// All known regions, snowing or not.
    ///
    /// A valid cache entry is served as is. Otherwise the source is asked;
    /// if that fails the stale cache entry is served with `offline` set.
    pub async fn regions(&self) -> anyhow::Result<RegionSnapshot> {
        if let Some(raw) = self.cache.get::<Vec<Value>>(SNOW_REGIONS_CACHE_KEY) {
            return Ok(RegionSnapshot {
                regions: normalize_all(&raw),
                offline: false,
            });
        }
        self.refresh_regions().await
    }

    /// Bypasses the cache and asks the source, falling back to stale data on failure.
    pub async fn refresh_regions(&self) -> anyhow::Result<RegionSnapshot> {
        let refreshed = self
            .cache
            .force_refresh(SNOW_REGIONS_CACHE_KEY, || self.fetch_regions())
            .await;

        match refreshed {
            Ok(regions) => Ok(RegionSnapshot {
                regions,
                offline: false,
            }),
            Err(err) => match self.cache.get_stale::<Vec<Value>>(SNOW_REGIONS_CACHE_KEY) {
                Some(raw) => {
                    warn!("Serving stale regions: {:#}", err);
                    Ok(RegionSnapshot {
                        regions: normalize_all(&raw),
                        offline: true,
                    })
                }
                None => Err(err),
            },
        }
    }

    async fn fetch_regions(&self) -> anyhow::Result<Vec<SnowRegion>> {
        let raw = self.source.fetch_regions().await?;
        Ok(raw.iter().map(region_from_record).collect())
    }
}

/// Normalizes one upstream record.
///
/// Records that carry a provider `weatherCode` but no `snowLevel` get their
/// level derived from the code.
pub fn region_from_record(record: &Value) -> SnowRegion {
    let mut region = SnowRegion::normalize(record);
    if record.get("snowLevel").is_none() {
        if let Some(code) = record.get("weatherCode") {
            let code = crate::models::to_number_or(Some(code), 0.0);
            region.snow_level = SnowLevel::from_weather_code(code as i64);
        }
    }
    region
}

fn normalize_all(raw: &[Value]) -> Vec<SnowRegion> {
    raw.iter().map(SnowRegion::normalize).collect()
}

// == List Helpers ==
/// Regions where it is snowing, in input order.
pub fn filter_snowing_cities(regions: &[SnowRegion]) -> Vec<SnowRegion> {
    regions.iter().filter(|r| r.is_snowing()).cloned().collect()
}

/// Cities whose name contains `keyword`, ignoring case.
///
/// An empty keyword matches nothing.
pub fn search_cities(keyword: &str, cities: &[City]) -> Vec<City> {
    if keyword.is_empty() {
        return Vec::new();
    }

    let needle = keyword.to_lowercase();
    cities
        .iter()
        .filter(|city| city.city_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

// == Formatting ==
/// One list row: `name | temperature°C | level | YYYY-MM-DD HH:MM`.
pub fn format_snow_list_item(region: &SnowRegion) -> String {
    format!(
        "{} | {}°C | {} | {}",
        region.city_name,
        region.temperature,
        region.snow_level,
        format_updated_time(&region.updated_at)
    )
}

/// Renders an ISO-8601 timestamp as `YYYY-MM-DD HH:MM` in its own offset.
///
/// Unparseable input is returned unchanged.
pub fn format_updated_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// One line per forecast day, or `暂无预报数据` when there is none.
pub fn format_forecast(forecast: &[SnowForecast]) -> String {
    if forecast.is_empty() {
        return "暂无预报数据".to_string();
    }

    forecast
        .iter()
        .map(|f| {
            format!(
                "日期: {} | 强度: {} | 时段: {} | 累计: {}mm",
                f.date, f.snow_level, f.snow_period, f.accumulation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line summary of current conditions followed by the forecast.
pub fn format_city_detail(detail: &CityDetail) -> String {
    let current = &detail.current;
    let mut lines = vec![
        format!("降雪状态: {}", current.snow_level),
        format!("温度: {}°C", current.temperature),
        format!("湿度: {}%", current.humidity),
        format!("风力: {}km/h {}", current.wind_speed, current.wind_direction),
    ];

    if !detail.forecast.is_empty() {
        lines.push("--- 未来降雪预报 ---".to_string());
        lines.extend(detail.forecast.iter().map(|f| {
            format!("{} | {} | {} | 累计{}mm", f.date, f.snow_level, f.snow_period, f.accumulation)
        }));
    }

    lines.join("\n")
}
