//! Spatial math for flight distances.

use crate::models::TrackPoint;

/// Mean Earth radius used by the haversine model.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Exact international foot.
pub const FEET_TO_METERS: f64 = 0.3048;

pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// Great-circle distance on a sphere of radius [`EARTH_RADIUS_M`]. Defined
/// for any finite input: identical points give 0, antipodal points give
/// roughly π·R.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 near the antipode.
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Surface distance between two track points, ignoring altitude.
pub fn surface_distance(a: &TrackPoint, b: &TrackPoint) -> f64 {
    haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Straight-line 3-D distance between two track points.
///
/// Horizontal component is the haversine surface distance, vertical
/// component the absolute altitude delta; the two are combined as legs of
/// a right triangle.
pub fn distance_3d(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let dist_h = surface_distance(a, b);
    let dist_v = (b.altitude_m - a.altitude_m).abs();
    (dist_h * dist_h + dist_v * dist_v).sqrt()
}

pub fn meters_to_nautical_miles(meters: f64) -> f64 {
    meters / METERS_PER_NAUTICAL_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64, alt: f64) -> TrackPoint {
        TrackPoint {
            latitude: lat,
            longitude: lon,
            altitude_m: alt,
            timestamp: 0,
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_distance(50.0379, 8.5622, 50.0379, 8.5622);
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn haversine_is_symmetric() {
        let ab = haversine_distance(50.0379, 8.5622, 40.6413, -73.7781);
        let ba = haversine_distance(40.6413, -73.7781, 50.0379, 8.5622);
        assert_eq!(ab, ba);
    }

    #[test]
    fn haversine_antipodal_is_half_circumference() {
        let dist = haversine_distance(0.0, 0.0, 0.0, 180.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((dist - expected).abs() < 1.0, "got {dist}");
        assert!(dist.is_finite());
    }

    #[test]
    fn distance_3d_combines_horizontal_and_vertical() {
        let a = point(0.0, 0.0, 0.0);
        let b = point(0.0, 0.0, 300.0);
        assert!((distance_3d(&a, &b) - 300.0).abs() < 1e-9);

        let c = point(0.01, 0.0, 300.0);
        let horizontal = surface_distance(&a, &c);
        let expected = (horizontal * horizontal + 300.0 * 300.0).sqrt();
        assert!((distance_3d(&a, &c) - expected).abs() < 1e-9);
    }

    #[test]
    fn nautical_mile_conversion() {
        assert!((meters_to_nautical_miles(3704.0) - 2.0).abs() < 1e-12);
    }
}
