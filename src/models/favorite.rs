//! Favorite city records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::normalize::{Fields, Normalize};

/// A city a user has saved to watch for snow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCity {
    /// Document id assigned by the database
    #[serde(rename = "_id")]
    pub id: String,
    pub open_id: String,
    pub city_id: String,
    pub city_name: String,
    /// ISO-8601 timestamp
    pub created_at: String,
}

impl Normalize for FavoriteCity {
    fn normalize(input: &Value) -> Self {
        let fields = Fields::of(input);
        Self {
            id: fields.string("_id", ""),
            open_id: fields.string("openId", ""),
            city_id: fields.string("cityId", ""),
            city_name: fields.string("cityName", ""),
            created_at: fields.timestamp("createdAt"),
        }
    }
}
