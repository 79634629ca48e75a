use crate::models::{BuildingFeature, Coordinate};

/// Earth's mean radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters to international feet
pub const METERS_TO_FEET: f64 = 3.28084;

/// Calculate the Haversine distance between two points in meters
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in meters
#[inline]
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Convert meters to feet, rounded to the nearest integer
#[inline]
pub fn meters_to_feet(meters: f64) -> u64 {
    (meters * METERS_TO_FEET).round() as u64
}

/// Scan every point of every feature and return the minimum distance in
/// meters from `origin`, together with the number of features that carried
/// a usable location.
///
/// Features without any location shape are skipped and do not count.
pub fn min_distance_m(origin: &Coordinate, features: &[BuildingFeature]) -> (Option<f64>, usize) {
    let mut min: Option<f64> = None;
    let mut scanned = 0;

    for feature in features {
        let points = feature.sample_points();
        if points.is_empty() {
            continue;
        }
        scanned += 1;
        for point in points {
            let dist = haversine_distance_m(origin.lat, origin.lon, point.lat, point.lon);
            min = Some(match min {
                Some(current) => current.min(dist),
                None => dist,
            });
        }
    }

    (min, scanned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeaturePoint;

    fn point_feature(lat: f64, lon: f64) -> BuildingFeature {
        BuildingFeature {
            id: None,
            center: Some(FeaturePoint { lat, lon }),
            lat: None,
            lon: None,
            geometry: None,
        }
    }

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london_lat = 51.5074;
        let london_lon = -0.1278;
        let paris_lat = 48.8566;
        let paris_lon = 2.3522;

        let distance = haversine_distance_m(london_lat, london_lon, paris_lat, paris_lon);
        assert!(
            (distance - 344_000.0).abs() < 10_000.0,
            "Distance should be ~344km, got {}m",
            distance
        );
    }

    #[test]
    fn test_haversine_zero_distance() {
        let distance = haversine_distance_m(39.5296, -119.8138, 39.5296, -119.8138);
        assert!(distance.abs() < 0.01);
    }

    #[test]
    fn test_meters_to_feet() {
        assert_eq!(meters_to_feet(0.0), 0);
        assert_eq!(meters_to_feet(1000.0), 3281);
        assert_eq!(meters_to_feet(1500.0), 4921);
        // 1524 m is exactly 5000 ft
        assert_eq!(meters_to_feet(1524.0), 5000);
    }

    #[test]
    fn test_min_distance_picks_closest_feature() {
        let origin = Coordinate::new(39.5296, -119.8138).unwrap();
        let features = vec![
            point_feature(39.60, -119.8138),  // ~7.8 km north
            point_feature(39.5386, -119.8138), // ~1 km north
        ];

        let (min, scanned) = min_distance_m(&origin, &features);
        assert_eq!(scanned, 2);
        let min = min.unwrap();
        assert!((min - 1000.0).abs() < 20.0, "expected ~1000m, got {}", min);
    }

    #[test]
    fn test_min_distance_uses_nearest_polygon_vertex() {
        let origin = Coordinate::new(39.5296, -119.8138).unwrap();
        let feature = BuildingFeature {
            id: Some(42),
            center: None,
            lat: None,
            lon: None,
            geometry: Some(vec![
                FeaturePoint { lat: 39.60, lon: -119.8138 },
                FeaturePoint { lat: 39.5386, lon: -119.8138 },
            ]),
        };

        let (min, scanned) = min_distance_m(&origin, &[feature]);
        assert_eq!(scanned, 1);
        assert!((min.unwrap() - 1000.0).abs() < 20.0);
    }

    #[test]
    fn test_min_distance_skips_features_without_location() {
        let origin = Coordinate::new(39.5296, -119.8138).unwrap();
        let bare = BuildingFeature {
            id: Some(1),
            center: None,
            lat: None,
            lon: None,
            geometry: None,
        };

        let (min, scanned) = min_distance_m(&origin, &[bare]);
        assert!(min.is_none());
        assert_eq!(scanned, 0);
    }

    #[test]
    fn test_min_distance_empty_input() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let (min, scanned) = min_distance_m(&origin, &[]);
        assert!(min.is_none());
        assert_eq!(scanned, 0);
    }
}
