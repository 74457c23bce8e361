use crate::core::distance::haversine_distance;
use crate::models::Item;

/// Keep only the items within `radius_km` of a point
///
/// Companion prefilter for the candidate supply: it applies the same
/// haversine formula as the location factor, so a radius-prefiltered pool
/// stays distance-consistent with scoring. Items without a complete
/// coordinate pair are excluded.
pub fn items_within_radius(items: Vec<Item>, lat: f64, lon: f64, radius_km: f64) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| match item.coordinates() {
            Some((item_lat, item_lon)) => {
                haversine_distance(lat, lon, item_lat, item_lon) <= radius_km
            }
            None => false,
        })
        .collect()
}
