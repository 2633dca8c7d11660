//! Favorites
//!
//! Pure list operations over a user's saved cities and the rule deciding
//! when a snow alert goes out.

use serde::Serialize;

use crate::models::{now_iso, City, FavoriteCity, SnowLevel, SnowRegion};

/// A favorite annotated with the city's current snow level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    #[serde(flatten)]
    pub favorite: FavoriteCity,
    pub snow_status: SnowLevel,
}

/// Appends `city` unless a favorite with the same city id already exists.
pub fn add_favorite_to_list(favorites: &[FavoriteCity], city: &City, open_id: &str) -> Vec<FavoriteCity> {
    let mut list = favorites.to_vec();
    if favorites.iter().any(|fav| fav.city_id == city.city_id) {
        return list;
    }

    list.push(FavoriteCity {
        id: format!("{}_{}", open_id, city.city_id),
        open_id: open_id.to_string(),
        city_id: city.city_id.clone(),
        city_name: city.city_name.clone(),
        created_at: now_iso(),
    });
    list
}

/// Drops every favorite for `city_id`.
pub fn remove_favorite_from_list(favorites: &[FavoriteCity], city_id: &str) -> Vec<FavoriteCity> {
    favorites
        .iter()
        .filter(|fav| fav.city_id != city_id)
        .cloned()
        .collect()
}

/// Pairs each favorite with the level of its region, `无` when unknown.
pub fn favorites_with_status(favorites: &[FavoriteCity], regions: &[SnowRegion]) -> Vec<FavoriteStatus> {
    favorites
        .iter()
        .map(|fav| {
            let snow_status = regions
                .iter()
                .find(|region| region.city_id == fav.city_id)
                .map_or(SnowLevel::None, |region| region.snow_level);
            FavoriteStatus {
                favorite: fav.clone(),
                snow_status,
            }
        })
        .collect()
}

/// An alert fires only when snow starts, not when it changes or stops.
pub fn check_snow_alert(previous: SnowLevel, current: SnowLevel) -> bool {
    !previous.is_active() && current.is_active()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Normalize;
    use proptest::prelude::*;
    use serde_json::json;

    fn city(id: &str, name: &str) -> City {
        City::normalize(&json!({"cityId": id, "cityName": name, "province": "黑龙江"}))
    }

    #[test]
    fn test_add_favorite() {
        let list = add_favorite_to_list(&[], &city("101050101", "哈尔滨"), "user-1");

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "user-1_101050101");
        assert_eq!(list[0].open_id, "user-1");
        assert_eq!(list[0].city_name, "哈尔滨");
        assert!(list[0].created_at.ends_with('Z'));
    }

    #[test]
    fn test_add_favorite_no_duplicate() {
        let harbin = city("101050101", "哈尔滨");
        let list = add_favorite_to_list(&[], &harbin, "user-1");
        let again = add_favorite_to_list(&list, &harbin, "user-1");

        assert_eq!(again, list);
    }

    #[test]
    fn test_remove_favorite() {
        let list = add_favorite_to_list(&[], &city("a", "A"), "u");
        let list = add_favorite_to_list(&list, &city("b", "B"), "u");

        let list = remove_favorite_from_list(&list, "a");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].city_id, "b");

        assert_eq!(remove_favorite_from_list(&list, "missing"), list);
    }

    #[test]
    fn test_favorites_with_status() {
        let list = add_favorite_to_list(&[], &city("a", "A"), "u");
        let list = add_favorite_to_list(&list, &city("b", "B"), "u");
        let regions = vec![SnowRegion::normalize(&json!({"cityId": "a", "snowLevel": "中雪"}))];

        let status = favorites_with_status(&list, &regions);
        assert_eq!(status[0].snow_status, SnowLevel::Moderate);
        assert_eq!(status[1].snow_status, SnowLevel::None);

        let json = serde_json::to_value(&status[0]).unwrap();
        assert_eq!(json["snowStatus"], "中雪");
        assert_eq!(json["_id"], "u_a");
        assert_eq!(json["cityId"], "a");
    }

    #[test]
    fn test_check_snow_alert() {
        assert!(check_snow_alert(SnowLevel::None, SnowLevel::Light));
        assert!(check_snow_alert(SnowLevel::None, SnowLevel::Blizzard));
        assert!(!check_snow_alert(SnowLevel::None, SnowLevel::None));
        assert!(!check_snow_alert(SnowLevel::Light, SnowLevel::Heavy));
        assert!(!check_snow_alert(SnowLevel::Heavy, SnowLevel::None));
    }

    proptest! {
        #[test]
        fn prop_add_then_remove_restores(ids in proptest::collection::vec("[a-z]{1,4}", 0..8), new_id in "[A-Z]{1,4}") {
            let mut list = Vec::new();
            for id in &ids {
                list = add_favorite_to_list(&list, &city(id, id), "u");
            }

            let added = add_favorite_to_list(&list, &city(&new_id, &new_id), "u");
            prop_assert_eq!(added.len(), list.len() + 1);
            prop_assert_eq!(remove_favorite_from_list(&added, &new_id), list);
        }

        #[test]
        fn prop_alert_only_on_start(prev in proptest::sample::select(SnowLevel::ALL.to_vec()), cur in proptest::sample::select(SnowLevel::ALL.to_vec())) {
            prop_assert_eq!(check_snow_alert(prev, cur), prev == SnowLevel::None && cur != SnowLevel::None);
        }
    }
}
