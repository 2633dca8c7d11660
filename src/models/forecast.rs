//! Snow forecast records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::normalize::{Fields, Normalize};
use crate::models::SnowLevel;

/// Expected snowfall for one city on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowForecast {
    pub city_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub snow_level: SnowLevel,
    /// Time window such as `08:00-14:00`
    pub snow_period: String,
    /// Millimeters, never negative
    pub accumulation: f64,
    pub temp_high: f64,
    pub temp_low: f64,
}

impl Normalize for SnowForecast {
    fn normalize(input: &Value) -> Self {
        let fields = Fields::of(input);
        Self {
            city_id: fields.string("cityId", ""),
            date: fields.string("date", ""),
            snow_level: fields.level("snowLevel"),
            snow_period: fields.string("snowPeriod", ""),
            accumulation: fields.non_negative("accumulation"),
            temp_high: fields.number("tempHigh", 0.0),
            temp_low: fields.number("tempLow", 0.0),
        }
    }
}
