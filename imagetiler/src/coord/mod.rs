//! Slippy-map tile math
//!
//! Provides conversions between geographic coordinates (longitude/latitude)
//! and Web Mercator tile indices, the inverse mapping to tile corners, and
//! the `{zoom}/{x}/{y}.{ext}` tile path convention.
//!
//! Coordinates outside the Web Mercator band are clamped before projection,
//! never rejected.

mod types;

pub use types::{
    Axis, BOUNDARY_EPSILON, DEFAULT_EXTENSION, DEFAULT_TILE_SIZE, MAX_ZOOM, MIN_ZOOM,
};

use std::f64::consts::PI;

use crate::geo::{clamp_latitude, clamp_longitude};

/// Number of tiles along one side of the world at `zoom`.
///
/// Zoom levels above [`MAX_ZOOM`] are treated as `MAX_ZOOM`.
#[inline]
pub fn tiles_per_side(zoom: u8) -> u32 {
    1u32 << zoom.min(MAX_ZOOM)
}

/// Projects a longitude or latitude to its fractional tile position in `[0, 1]`.
///
/// Longitude maps linearly from the antimeridian eastwards. Latitude uses the
/// Web Mercator formula `(1 − ln(tan φ + sec φ) / π) / 2`, growing southwards.
#[inline]
pub fn tile_fraction(value: f64, axis: Axis) -> f64 {
    match axis {
        Axis::Longitude => (clamp_longitude(value) + 180.0) / 360.0,
        Axis::Latitude => {
            let lat_rad = clamp_latitude(value).to_radians();
            (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
        }
    }
}

/// Converts a fractional tile position to an integer index at `zoom`.
///
/// The result is always a valid index in `[0, 2^zoom − 1]`.
#[inline]
pub fn tile_index(fraction: f64, zoom: u8) -> u32 {
    let n = tiles_per_side(zoom);
    let index = (fraction * n as f64 + BOUNDARY_EPSILON).floor();
    if index.is_nan() || index < 0.0 {
        0
    } else if index >= n as f64 {
        n - 1
    } else {
        index as u32
    }
}

/// Tile X index containing `lon` at `zoom`.
#[inline]
pub fn lon_to_tile_x(lon: f64, zoom: u8) -> u32 {
    tile_index(tile_fraction(lon, Axis::Longitude), zoom)
}

/// Tile Y index containing `lat` at `zoom`.
#[inline]
pub fn lat_to_tile_y(lat: f64, zoom: u8) -> u32 {
    tile_index(tile_fraction(lat, Axis::Latitude), zoom)
}

/// Longitude of the western edge of tile column `x`.
///
/// `x` may equal `2^zoom`, which yields the eastern edge of the last column.
#[inline]
pub fn tile_corner_longitude(x: u32, zoom: u8) -> f64 {
    let n = tiles_per_side(zoom) as f64;
    x as f64 / n * 360.0 - 180.0
}

/// Latitude of the northern edge of tile row `y`.
///
/// `y` may equal `2^zoom`, which yields the southern edge of the last row.
#[inline]
pub fn tile_corner_latitude(y: u32, zoom: u8) -> f64 {
    let n = tiles_per_side(zoom) as f64;
    (PI - 2.0 * PI * y as f64 / n).sinh().atan().to_degrees()
}

/// Formats the `{zoom}/{x}/{y}.{ext}` path of a tile.
///
/// # Example
///
/// ```
/// use imagetiler::coord::tile_path;
///
/// assert_eq!(tile_path(4346, 2792, 13, "png"), "13/4346/2792.png");
/// ```
pub fn tile_path(x: u32, y: u32, zoom: u8, ext: &str) -> String {
    format!("{}/{}/{}.{}", zoom, x, y, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fixture_at_zoom_13() {
        assert_eq!(lon_to_tile_x(11.01296, 13), 4346);
        assert_eq!(lat_to_tile_y(49.60055, 13), 2792);
        assert_eq!(tile_path(4346, 2792, 13, "png"), "13/4346/2792.png");
    }

    #[test]
    fn test_new_york_city_at_zoom_16() {
        assert_eq!(lat_to_tile_y(40.7128, 16), 24640);
        assert_eq!(lon_to_tile_x(-74.0060, 16), 19295);
    }

    #[test]
    fn test_zoom_zero_is_single_tile() {
        assert_eq!(tiles_per_side(0), 1);
        assert_eq!(lon_to_tile_x(179.0, 0), 0);
        assert_eq!(lat_to_tile_y(-85.0, 0), 0);
    }

    #[test]
    fn test_fraction_of_equator_and_meridian() {
        assert!((tile_fraction(0.0, Axis::Longitude) - 0.5).abs() < 1e-12);
        assert!((tile_fraction(0.0, Axis::Latitude) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        // Beyond the band maps to the edge rows/columns, never panics
        assert_eq!(lat_to_tile_y(90.0, 10), 0);
        assert_eq!(lat_to_tile_y(-90.0, 10), 1023);
        assert_eq!(lon_to_tile_x(180.0, 10), 1023);
        assert_eq!(lon_to_tile_x(-500.0, 10), 0);
    }

    #[test]
    fn test_tile_index_nan_is_zero() {
        assert_eq!(tile_index(f64::NAN, 5), 0);
    }

    #[test]
    fn test_corner_inverse_at_equator() {
        assert!(tile_corner_longitude(512, 10).abs() < 1e-12);
        assert!(tile_corner_latitude(512, 10).abs() < 1e-12);
    }

    #[test]
    fn test_corner_edges_of_world() {
        assert_eq!(tile_corner_longitude(0, 3), -180.0);
        assert_eq!(tile_corner_longitude(8, 3), 180.0);
        assert!((tile_corner_latitude(0, 3) - 85.0511287798).abs() < 1e-9);
        assert!((tile_corner_latitude(8, 3) + 85.0511287798).abs() < 1e-9);
    }

    #[test]
    fn test_corner_maps_back_to_its_tile() {
        // Corners land exactly on the boundary; the tolerance keeps them in place
        for zoom in [1, 7, 13, 18] {
            for x in [0, 1, 3, tiles_per_side(zoom) / 3, tiles_per_side(zoom) - 1] {
                let lon = tile_corner_longitude(x, zoom);
                assert_eq!(lon_to_tile_x(lon, zoom), x, "x {} at zoom {}", x, zoom);
            }
            for y in [1, 2, tiles_per_side(zoom) / 3, tiles_per_side(zoom) - 1] {
                let lat = tile_corner_latitude(y, zoom);
                assert_eq!(lat_to_tile_y(lat, zoom), y, "y {} at zoom {}", y, zoom);
            }
        }
    }

    #[test]
    fn test_boundary_tolerance_recovers_short_corners() {
        // Projecting a row's northern edge often lands a few ulps above the
        // previous row; a plain floor would assign it there.
        let mut short_corners = 0;
        for zoom in [10u8, 14, 18] {
            let n = tiles_per_side(zoom);
            for y in (1..n).step_by((n / 1024).max(1) as usize) {
                let fraction = tile_fraction(tile_corner_latitude(y, zoom), Axis::Latitude);
                if ((fraction * n as f64).floor() as u32) < y {
                    short_corners += 1;
                }
                assert_eq!(tile_index(fraction, zoom), y, "y {} at zoom {}", y, zoom);
            }
        }
        assert!(short_corners > 0);
    }

    #[test]
    fn test_tile_index_tolerance_is_tiny() {
        // Points clearly inside a tile are not pushed into the next one
        assert_eq!(tile_index(0.5 - 1e-6, 1), 0);
        assert_eq!(tile_index(0.25 - 1e-7, 2), 0);
        assert_eq!(tile_index(0.25, 2), 1);
    }

    #[test]
    fn test_tile_path_with_other_extension() {
        assert_eq!(tile_path(0, 0, 0, "jpg"), "0/0/0.jpg");
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_indices_in_range(
                lat in -90.0..90.0_f64,
                lon in -200.0..200.0_f64,
                zoom in 0u8..=MAX_ZOOM
            ) {
                let n = tiles_per_side(zoom);
                let x = lon_to_tile_x(lon, zoom);
                let y = lat_to_tile_y(lat, zoom);

                prop_assert!(x < n, "Col {} exceeds maximum {} at zoom {}", x, n, zoom);
                prop_assert!(y < n, "Row {} exceeds maximum {} at zoom {}", y, n, zoom);
            }

            #[test]
            fn test_longitude_monotonic(
                lon1 in -180.0..179.0_f64,
                delta in 0.0..1.0_f64,
                zoom in 0u8..=20
            ) {
                let lon2 = lon1 + delta;
                prop_assert!(lon_to_tile_x(lon1, zoom) <= lon_to_tile_x(lon2, zoom));
            }

            #[test]
            fn test_latitude_monotonic(
                lat1 in -85.0..85.0_f64,
                delta in 0.0..1.0_f64,
                zoom in 0u8..=20
            ) {
                // Rows grow southwards
                let lat2 = (lat1 - delta).max(-85.0);
                prop_assert!(lat_to_tile_y(lat1, zoom) <= lat_to_tile_y(lat2, zoom));
            }

            #[test]
            fn test_tile_path_format(
                x in any::<u32>(),
                y in any::<u32>(),
                zoom in any::<u8>()
            ) {
                prop_assert_eq!(tile_path(x, y, zoom, "png"), format!("{}/{}/{}.png", zoom, x, y));
            }

            #[test]
            fn test_corner_roundtrip(
                lat in -85.0..85.0_f64,
                lon in -180.0..179.9_f64,
                zoom in 0u8..=20
            ) {
                let x = lon_to_tile_x(lon, zoom);
                let y = lat_to_tile_y(lat, zoom);

                // The point lies between the corners of its tile
                prop_assert!(tile_corner_longitude(x, zoom) <= lon + 1e-6);
                prop_assert!(lon < tile_corner_longitude(x + 1, zoom) + 1e-6);
                prop_assert!(tile_corner_latitude(y, zoom) >= lat - 1e-6);
                prop_assert!(lat > tile_corner_latitude(y + 1, zoom) - 1e-6);
            }
        }
    }
}
