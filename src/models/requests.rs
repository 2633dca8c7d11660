//! Request DTOs for the snow finder API
//!
//! Defines the query strings accepted by the HTTP endpoints.

use serde::Deserialize;

use crate::geo::GeoPoint;

/// Query for GET /nearby
///
/// # Fields
/// - `lat`, `lon`: The caller's position in decimal degrees
/// - `radius`: Optional search radius in kilometers
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub radius: Option<f64>,
}

impl NearbyQuery {
    /// Validates the query, returning the origin point.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<GeoPoint, String> {
        let origin = GeoPoint::checked(self.lat, self.lon).ok_or_else(|| {
            format!(
                "Coordinates out of range: lat={} lon={} (lat in [-90, 90], lon in [-180, 180])",
                self.lat, self.lon
            )
        })?;

        if let Some(radius) = self.radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(format!("Radius must be a non-negative number, got {}", radius));
            }
        }

        Ok(origin)
    }
}

/// Query for GET /search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}
