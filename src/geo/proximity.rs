//! Proximity Module
//!
//! Filters and ranks active regions by distance from an origin. Both entry
//! points share the activity predicate and the distance metric; one is bounded
//! by a radius and returns a ranked list, the other is unbounded and returns
//! the single closest region.

use serde::Serialize;

use crate::geo::{distance_km, GeoPoint, LeveledRegion};
use crate::models::SnowLevel;

// == Proximity Result ==
/// An active region annotated with its distance from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResult {
    #[serde(rename = "cityId")]
    pub id: String,
    #[serde(rename = "cityName")]
    pub name: String,
    /// Kilometers from the origin
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "snowLevel")]
    pub level: SnowLevel,
    pub temperature: f64,
}

impl ProximityResult {
    pub fn new<R: LeveledRegion + ?Sized>(region: &R, distance_km: f64) -> Self {
        Self {
            id: region.id().to_string(),
            name: region.name().to_string(),
            distance_km,
            level: region.level(),
            temperature: region.temperature(),
        }
    }
}

// == Filter Nearby ==
/// Active regions within `radius_km` of `origin`, closest first.
///
/// Regions at equal distance keep their input order.
pub fn filter_nearby<R: LeveledRegion>(origin: GeoPoint, regions: &[R], radius_km: f64) -> Vec<ProximityResult> {
    let mut results: Vec<ProximityResult> = regions
        .iter()
        .filter(|region| region.is_active())
        .filter_map(|region| {
            let distance = distance_km(origin, region.location());
            (distance <= radius_km).then(|| ProximityResult::new(region, distance))
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    results
}

// == Find Nearest Active ==
/// The closest active region regardless of distance.
///
/// The first region encountered wins a tie. Returns `None` when no region is
/// active.
pub fn find_nearest_active<R: LeveledRegion>(origin: GeoPoint, regions: &[R]) -> Option<&R> {
    let mut nearest: Option<(&R, f64)> = None;

    for region in regions.iter().filter(|region| region.is_active()) {
        let distance = distance_km(origin, region.location());
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((region, distance));
        }
    }

    nearest.map(|(region, _)| region)
}

// == Nearby Or Nearest ==
/// Outcome of a "what is snowing near me" query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbySnow {
    /// Active regions inside the radius, closest first
    pub results: Vec<ProximityResult>,
    /// Closest active region anywhere, only filled when `results` is empty
    pub nearest: Option<ProximityResult>,
}

/// Runs [`filter_nearby`], falling back to [`find_nearest_active`] when
/// nothing is inside the radius.
pub fn nearby_or_nearest<R: LeveledRegion>(origin: GeoPoint, regions: &[R], radius_km: f64) -> NearbySnow {
    let results = filter_nearby(origin, regions, radius_km);
    let nearest = if results.is_empty() {
        find_nearest_active(origin, regions)
            .map(|region| ProximityResult::new(region, distance_km(origin, region.location())))
    } else {
        None
    };

    NearbySnow { results, nearest }
}
