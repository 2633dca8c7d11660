//! Domain records and HTTP DTOs
//!
//! Records are built through [`Normalize`] so that downstream code can rely
//! on every field being present and in range. The request and response
//! types describe the HTTP bodies of the API.

mod city;
mod favorite;
mod forecast;
mod level;
mod normalize;
mod region;

pub mod requests;
pub mod responses;


// Re-export commonly used types
pub use city::{City, CityDetail, CurrentConditions};
pub use favorite::FavoriteCity;
pub use forecast::SnowForecast;
pub use level::SnowLevel;
pub use normalize::{now_iso, to_number_or, to_string_or, Normalize};
pub use region::SnowRegion;
pub use requests::{NearbyQuery, SearchQuery};
pub use responses::{HealthResponse, NearbyResponse, RegionsResponse, SearchResponse, StatsResponse};
