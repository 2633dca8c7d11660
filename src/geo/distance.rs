//! Haversine distance

use crate::geo::{GeoPoint, EARTH_RADIUS_KM};

/// Great-circle distance between two points in kilometers.
///
/// The haversine term is clamped to [0, 1] so rounding near antipodal points
/// cannot push `sqrt` out of its domain.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
