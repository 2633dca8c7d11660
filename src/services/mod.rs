//! Services Module
//!
//! Region access through the cache, plus the favorites rules.

mod favorites;
mod snow;
mod source;

pub use favorites::{
    add_favorite_to_list, check_snow_alert, favorites_with_status, remove_favorite_from_list, FavoriteStatus,
};
pub use snow::{
    city_detail_cache_key, filter_snowing_cities, forecast_cache_key, format_city_detail, format_forecast,
    format_snow_list_item, format_updated_time, region_from_record, search_cities, RegionSnapshot, SnowService,
    SNOW_REGIONS_CACHE_KEY,
};
pub use source::{FileSnowSource, SnowDataSource};
