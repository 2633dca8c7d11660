//! Geo Module
//!
//! Great-circle distance and proximity ranking of leveled regions.

mod distance;
mod proximity;


use serde::{Deserialize, Serialize};

use crate::models::SnowLevel;

pub use distance::distance_km;
pub use proximity::{filter_nearby, find_nearest_active, nearby_or_nearest, NearbySnow, ProximityResult};

// == Public Constants ==
/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Search radius used when a caller gives none
pub const DEFAULT_RADIUS_KM: f64 = 200.0;

// == Geo Point ==
/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Builds a point only if both coordinates are finite and in range.
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        let point = Self::new(latitude, longitude);
        point.is_valid().then_some(point)
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

// == Leveled Region ==
/// A geolocated entity with a snow level.
///
/// The proximity functions only consider regions that are active, meaning
/// their level is anything but [`SnowLevel::None`].
pub trait LeveledRegion {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn location(&self) -> GeoPoint;
    fn level(&self) -> SnowLevel;
    fn temperature(&self) -> f64;

    fn is_active(&self) -> bool {
        self.level().is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_point() {
        assert!(GeoPoint::checked(39.9, 116.4).is_some());
        assert!(GeoPoint::checked(90.0, -180.0).is_some());
        assert!(GeoPoint::checked(90.1, 0.0).is_none());
        assert!(GeoPoint::checked(0.0, 180.5).is_none());
        assert!(GeoPoint::checked(f64::NAN, 0.0).is_none());
    }
}
