//! Geographic point value type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{bearing, clamp_latitude, clamp_longitude, destination, distance};

/// An immutable longitude/latitude pair in degrees.
///
/// Coordinates are clamped on construction to the Web Mercator valid band
/// (longitude `[-180, 179.9999999]`, latitude `±85.0511287798`), so every
/// `GeoPoint` has a well-defined slippy-map tile.
///
/// Arguments are always longitude first.
///
/// Equality is exact floating-point equality of both fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGeoPoint")]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

/// Deserialized fields before clamping.
#[derive(Deserialize)]
struct RawGeoPoint {
    lon: f64,
    lat: f64,
}

impl From<RawGeoPoint> for GeoPoint {
    fn from(raw: RawGeoPoint) -> Self {
        GeoPoint::new(raw.lon, raw.lat)
    }
}

impl GeoPoint {
    /// Creates a point, clamping both coordinates into the valid band.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon: clamp_longitude(lon),
            lat: clamp_latitude(lat),
        }
    }

    /// Parses a point from separate longitude and latitude strings.
    ///
    /// Returns `None` when either value is not a number; the caller decides
    /// on a fallback.
    ///
    /// # Example
    ///
    /// ```
    /// use imagetiler::geo::GeoPoint;
    ///
    /// let p = GeoPoint::parse("2.33535", "48.86709").unwrap();
    /// assert_eq!(p.lon(), 2.33535);
    /// assert!(GeoPoint::parse("east", "48.0").is_none());
    /// ```
    pub fn parse(lon: &str, lat: &str) -> Option<Self> {
        let lon = lon.trim().parse::<f64>().ok()?;
        let lat = lat.trim().parse::<f64>().ok()?;
        Some(Self::new(lon, lat))
    }

    /// Parses a `"lon,lat"` pair.
    pub fn parse_pair(value: &str) -> Option<Self> {
        let (lon, lat) = value.split_once(',')?;
        Self::parse(lon, lat)
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Great-circle distance to `other`, in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance(self.lon, self.lat, other.lon, other.lat)
    }

    /// Initial bearing towards `other`, in radians (0 = north).
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        bearing(self.lon, self.lat, other.lon, other.lat)
    }

    /// The point reached by travelling `distance_m` meters along `bearing`.
    pub fn destination(&self, bearing: f64, distance_m: f64) -> GeoPoint {
        let (lon, lat) = destination(self.lon, self.lat, bearing, distance_m);
        GeoPoint::new(lon, lat)
    }

    /// Returns a copy with the longitude taken from `other`.
    pub fn with_lon_of(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint::new(other.lon, self.lat)
    }

    /// Returns a copy with the latitude taken from `other`.
    pub fn with_lat_of(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint::new(self.lon, other.lat)
    }

    /// Component-wise minimum (south-west corner of the box spanned by `a` and `b`).
    pub fn min(a: &GeoPoint, b: &GeoPoint) -> GeoPoint {
        GeoPoint::new(a.lon.min(b.lon), a.lat.min(b.lat))
    }

    /// Component-wise maximum (north-east corner of the box spanned by `a` and `b`).
    pub fn max(a: &GeoPoint, b: &GeoPoint) -> GeoPoint {
        GeoPoint::new(a.lon.max(b.lon), a.lat.max(b.lat))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lon, self.lat)
    }
}
