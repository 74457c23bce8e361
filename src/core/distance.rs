/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the great-circle (haversine) distance between two points
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance_zero() {
        let distance = haversine_distance(37.78, -122.43, 37.78, -122.43);
        assert!(distance < 0.01);
    }

    #[test]
    fn test_haversine_distance_london_paris() {
        // Distance from London to Paris (approximately 344 km)
        let distance = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(
            (distance - 344.0).abs() < 10.0,
            "Distance should be ~344km, got {}",
            distance
        );
    }

    #[test]
    fn test_haversine_distance_within_city() {
        // Two points in San Francisco, roughly 1.4km apart
        let distance = haversine_distance(37.78, -122.43, 37.79, -122.44);
        assert!(distance > 0.5 && distance < 5.0, "got {}", distance);
    }

    #[test]
    fn test_haversine_distance_symmetric() {
        let forward = haversine_distance(37.78, -122.43, 40.7128, -74.0060);
        let backward = haversine_distance(40.7128, -74.0060, 37.78, -122.43);
        assert_eq!(forward, backward);
    }
}
