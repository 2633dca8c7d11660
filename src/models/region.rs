//! Snow Region Module
//!
//! Current conditions for one city, plus its JSON serializer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::{GeoPoint, LeveledRegion};
use crate::models::normalize::{Fields, Normalize};
use crate::models::SnowLevel;

// == Snow Region ==
/// Weather snapshot for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowRegion {
    pub city_id: String,
    pub city_name: String,
    pub province: String,
    /// Degrees, within [-90, 90]
    pub latitude: f64,
    /// Degrees, within [-180, 180]
    pub longitude: f64,
    /// Celsius
    pub temperature: f64,
    /// Percent, within [0, 100]
    pub humidity: f64,
    /// km/h, never negative
    pub wind_speed: f64,
    pub wind_direction: String,
    pub snow_level: SnowLevel,
    /// Kilometers, never negative
    pub visibility: f64,
    /// ISO-8601 timestamp
    pub updated_at: String,
}

impl Normalize for SnowRegion {
    fn normalize(input: &Value) -> Self {
        let fields = Fields::of(input);
        Self {
            city_id: fields.string("cityId", ""),
            city_name: fields.string("cityName", ""),
            province: fields.string("province", ""),
            latitude: fields.clamped("latitude", -90.0, 90.0),
            longitude: fields.clamped("longitude", -180.0, 180.0),
            temperature: fields.number("temperature", 0.0),
            humidity: fields.clamped("humidity", 0.0, 100.0),
            wind_speed: fields.non_negative("windSpeed"),
            wind_direction: fields.string("windDirection", ""),
            snow_level: fields.level("snowLevel"),
            visibility: fields.non_negative("visibility"),
            updated_at: fields.timestamp("updatedAt"),
        }
    }
}

impl SnowRegion {
    // == Serializer ==
    /// Compact JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses JSON text and normalizes it.
    ///
    /// Only malformed JSON is an error; missing or out-of-range fields are
    /// defaulted and clamped.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Ok(Self::normalize(&raw))
    }

    pub fn is_snowing(&self) -> bool {
        self.snow_level.is_active()
    }
}

impl LeveledRegion for SnowRegion {
    fn id(&self) -> &str {
        &self.city_id
    }

    fn name(&self) -> &str {
        &self.city_name
    }

    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    fn level(&self) -> SnowLevel {
        self.snow_level
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_empty_input() {
        let region = SnowRegion::normalize(&json!({}));

        assert_eq!(region.city_id, "");
        assert_eq!(region.latitude, 0.0);
        assert_eq!(region.snow_level, SnowLevel::None);
        assert!(chrono::DateTime::parse_from_rfc3339(&region.updated_at).is_ok());
    }

    #[test]
    fn test_normalize_clamps_humidity() {
        assert_eq!(SnowRegion::normalize(&json!({"humidity": -10})).humidity, 0.0);
        assert_eq!(SnowRegion::normalize(&json!({"humidity": 150})).humidity, 100.0);
        assert_eq!(SnowRegion::normalize(&json!({"humidity": "55"})).humidity, 55.0);
    }

    #[test]
    fn test_normalize_clamps_coordinates() {
        let region = SnowRegion::normalize(&json!({"latitude": 120, "longitude": -500}));
        assert_eq!(region.latitude, 90.0);
        assert_eq!(region.longitude, -180.0);
    }

    #[test]
    fn test_normalize_non_negative_fields() {
        let region = SnowRegion::normalize(&json!({"windSpeed": -3, "visibility": -0.5}));
        assert_eq!(region.wind_speed, 0.0);
        assert_eq!(region.visibility, 0.0);
    }

    #[test]
    fn test_normalize_unknown_level() {
        let region = SnowRegion::normalize(&json!({"snowLevel": "bogus"}));
        assert_eq!(region.snow_level, SnowLevel::None);

        let region = SnowRegion::normalize(&json!({"snowLevel": "暴雪"}));
        assert_eq!(region.snow_level, SnowLevel::Blizzard);
    }

    #[test]
    fn test_normalize_ignores_extra_fields() {
        let region = SnowRegion::normalize(&json!({"cityId": "101050101", "weatherCode": 401}));
        assert_eq!(region.city_id, "101050101");
    }

    #[test]
    fn test_normalize_keeps_updated_at() {
        let region = SnowRegion::normalize(&json!({"updatedAt": "2024-01-15T10:00:00.000Z"}));
        assert_eq!(region.updated_at, "2024-01-15T10:00:00.000Z");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = SnowRegion::normalize(&json!({
            "cityId": 101,
            "cityName": "哈尔滨",
            "latitude": "45.75",
            "humidity": 300,
            "snowLevel": "中雪",
        }));
        let twice = SnowRegion::normalize(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
        assert_eq!(once.city_id, "101");
    }

    #[test]
    fn test_json_roundtrip() {
        let region = SnowRegion::normalize(&json!({"cityName": "长春", "snowLevel": "大雪"}));
        let text = region.to_json().unwrap();
        assert_eq!(SnowRegion::from_json(&text).unwrap(), region);
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let region = SnowRegion::normalize(&json!({"cityName": "长春"}));
        let pretty = region.to_pretty_json().unwrap();
        assert!(pretty.contains("\n  \"cityName\": \"长春\""));
    }

    #[test]
    fn test_from_json_rejects_invalid_text() {
        assert!(SnowRegion::from_json("{not json").is_err());
    }

    #[test]
    fn test_leveled_region_view() {
        let region = SnowRegion::normalize(&json!({
            "cityId": "c1",
            "cityName": "北京",
            "latitude": 39.9,
            "longitude": 116.4,
            "snowLevel": "小雪",
            "temperature": -3,
        }));

        assert_eq!(region.id(), "c1");
        assert_eq!(region.location(), GeoPoint::new(39.9, 116.4));
        assert!(region.is_active());
        assert_eq!(LeveledRegion::temperature(&region), -3.0);
    }
}
