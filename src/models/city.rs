//! City Module
//!
//! City identity used by search, and the detail view combining current
//! conditions with a forecast.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::normalize::{Fields, Normalize};
use crate::models::{SnowForecast, SnowLevel, SnowRegion};

// == City ==
/// Basic city identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub city_id: String,
    pub city_name: String,
    pub province: String,
}

impl Normalize for City {
    fn normalize(input: &Value) -> Self {
        let fields = Fields::of(input);
        Self {
            city_id: fields.string("cityId", ""),
            city_name: fields.string("cityName", ""),
            province: fields.string("province", ""),
        }
    }
}

impl From<&SnowRegion> for City {
    fn from(region: &SnowRegion) -> Self {
        Self {
            city_id: region.city_id.clone(),
            city_name: region.city_name.clone(),
            province: region.province.clone(),
        }
    }
}

// == Current Conditions ==
/// Live weather block of a [`CityDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub snow_level: SnowLevel,
    pub visibility: f64,
}

impl Normalize for CurrentConditions {
    fn normalize(input: &Value) -> Self {
        let fields = Fields::of(input);
        Self {
            temperature: fields.number("temperature", 0.0),
            humidity: fields.clamped("humidity", 0.0, 100.0),
            wind_speed: fields.non_negative("windSpeed"),
            wind_direction: fields.string("windDirection", ""),
            snow_level: fields.level("snowLevel"),
            visibility: fields.non_negative("visibility"),
        }
    }
}

// == City Detail ==
/// Everything the detail page shows for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDetail {
    pub city_id: String,
    pub city_name: String,
    pub current: CurrentConditions,
    pub forecast: Vec<SnowForecast>,
    pub updated_at: String,
}

impl Normalize for CityDetail {
    fn normalize(input: &Value) -> Self {
        let fields = Fields::of(input);
        let forecast = fields
            .get("forecast")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(SnowForecast::normalize).collect())
            .unwrap_or_default();

        Self {
            city_id: fields.string("cityId", ""),
            city_name: fields.string("cityName", ""),
            current: CurrentConditions::normalize(fields.get("current").unwrap_or(&Value::Null)),
            forecast,
            updated_at: fields.timestamp("updatedAt"),
        }
    }
}
