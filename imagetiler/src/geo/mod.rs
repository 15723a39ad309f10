//! Great-circle math on a spherical Earth.
//!
//! Provides distance, initial bearing and destination-point calculations
//! used to move between a pinned image pixel and geographic coordinates,
//! plus clamping of longitude/latitude into the Web Mercator valid band.
//!
//! Public functions take and return degrees for coordinates and radians
//! for bearings. NaN inputs propagate to NaN outputs; nothing is guarded.
//!
//! Formulas follow <http://www.movable-type.co.uk/scripts/latlong.html>.

mod point;

pub use point::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Southern edge of the Web Mercator valid band.
pub const MIN_LAT: f64 = -85.0511287798;
/// Northern edge of the Web Mercator valid band.
pub const MAX_LAT: f64 = 85.0511287798;

/// Western edge of the valid longitude range.
pub const MIN_LON: f64 = -180.0;
/// Eastern edge of the valid longitude range.
///
/// Kept just below 180 so the eastern edge still maps into the last tile
/// column instead of one past it.
pub const MAX_LON: f64 = 179.9999999;

/// Clamps a latitude into `[MIN_LAT, MAX_LAT]`.
#[inline]
pub fn clamp_latitude(latitude: f64) -> f64 {
    if latitude < MIN_LAT {
        MIN_LAT
    } else if latitude > MAX_LAT {
        MAX_LAT
    } else {
        latitude
    }
}

/// Clamps a longitude into `[MIN_LON, MAX_LON]`.
#[inline]
pub fn clamp_longitude(longitude: f64) -> f64 {
    if longitude < MIN_LON {
        MIN_LON
    } else if longitude > MAX_LON {
        MAX_LON
    } else {
        longitude
    }
}

/// Haversine great-circle distance between two points, in meters.
///
/// # Arguments
///
/// * `lon1`, `lat1` - First point in degrees
/// * `lon2`, `lat2` - Second point in degrees
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Initial bearing from the first point towards the second, in radians.
///
/// The result lies in `(-π, π]`, with 0 pointing north and π/2 east.
pub fn bearing(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    y.atan2(x)
}

/// Solves the direct geodesic problem on the sphere.
///
/// Returns the `(longitude, latitude)` in degrees of the point reached by
/// travelling `distance_m` meters from the origin along the initial
/// `bearing` (radians). The result is not clamped; wrap it in a
/// [`GeoPoint`] to bring it back into the valid band.
pub fn destination(lon: f64, lat: f64, bearing: f64, distance_m: f64) -> (f64, f64) {
    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();
    let angular = distance_m / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    (lon2.to_degrees(), lat2.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_clamp_latitude() {
        assert_eq!(clamp_latitude(90.0), MAX_LAT);
        assert_eq!(clamp_latitude(-90.0), MIN_LAT);
        assert_eq!(clamp_latitude(48.5), 48.5);
    }

    #[test]
    fn test_clamp_longitude() {
        assert_eq!(clamp_longitude(180.0), MAX_LON);
        assert_eq!(clamp_longitude(-200.0), MIN_LON);
        assert_eq!(clamp_longitude(2.33535), 2.33535);
    }

    #[test]
    fn test_distance_one_degree_on_equator() {
        // One degree of arc is R * π / 180
        let d = distance(0.0, 0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_M * PI / 180.0;
        assert!((d - expected).abs() < 1e-6, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = distance(2.335904, 48.863854, 2.339723, 48.866155);
        let b = distance(2.339723, 48.866155, 2.335904, 48.863854);
        assert!((a - b).abs() < 1e-9);
        // Two nearby points in Paris, a few hundred meters apart
        assert!(a > 300.0 && a < 400.0, "got {}", a);
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        assert_eq!(distance(11.01296, 49.60055, 11.01296, 49.60055), 0.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        assert!((bearing(0.0, 0.0, 0.0, 1.0)).abs() < 1e-12, "north");
        assert!((bearing(0.0, 0.0, 1.0, 0.0) - FRAC_PI_2).abs() < 1e-12, "east");
        assert!((bearing(0.0, 0.0, -1.0, 0.0) + FRAC_PI_2).abs() < 1e-12, "west");
        assert!((bearing(0.0, 1.0, 0.0, 0.0).abs() - PI).abs() < 1e-12, "south");
    }

    #[test]
    fn test_destination_inverts_bearing_and_distance() {
        let (lon1, lat1) = (10.951, 49.5611);
        let (lon2, lat2) = (11.0574, 49.6282);

        let b = bearing(lon1, lat1, lon2, lat2);
        let d = distance(lon1, lat1, lon2, lat2);
        let (lon, lat) = destination(lon1, lat1, b, d);

        assert!((lon - lon2).abs() < 1e-9, "lon {} vs {}", lon, lon2);
        assert!((lat - lat2).abs() < 1e-9, "lat {} vs {}", lat, lat2);
    }

    #[test]
    fn test_destination_zero_distance() {
        let (lon, lat) = destination(2.33535, 48.86709, 1.0, 0.0);
        assert!((lon - 2.33535).abs() < 1e-12);
        assert!((lat - 48.86709).abs() < 1e-12);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance(f64::NAN, 0.0, 0.0, 0.0).is_nan());
        assert!(bearing(0.0, f64::NAN, 0.0, 0.0).is_nan());
    }
}
