//! Image-space point value type.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A signed pixel position on an image.
///
/// Coordinates may be negative, e.g. when the projected origin of a tile
/// lies above or to the left of the image canvas.
///
/// Bearings use the compass convention of [`crate::geo`]: 0 points "north"
/// (towards negative `y`) and π/2 points "east" (towards positive `x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    x: i64,
    y: i64,
}

impl ImagePoint {
    /// Creates a point from its pixel offsets.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Horizontal offset in pixels.
    #[inline]
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Vertical offset in pixels, growing downwards.
    #[inline]
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Euclidean distance to `other`, in pixels.
    pub fn distance_to(&self, other: &ImagePoint) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        dx.hypot(dy)
    }

    /// Planar bearing towards `other`, in radians.
    ///
    /// Computed as `atan2(Δx, −Δy)` so it can be fed directly into the
    /// geographic destination formula.
    pub fn bearing_to(&self, other: &ImagePoint) -> f64 {
        let dx = (other.x - self.x) as f64;
        // Negate in integers so a zero offset stays +0.0
        let north = (self.y - other.y) as f64;
        dx.atan2(north)
    }

    /// The point reached by moving `distance` pixels along `bearing`.
    ///
    /// The result is rounded to the nearest pixel.
    pub fn destination(&self, bearing: f64, distance: f64) -> ImagePoint {
        let x = self.x as f64 + bearing.sin() * distance;
        let y = self.y as f64 - bearing.cos() * distance;
        ImagePoint::new(x.round() as i64, y.round() as i64)
    }

    /// Offset from this point to `other`.
    pub fn delta(&self, other: &ImagePoint) -> ImagePoint {
        *other - *self
    }
}

impl Add for ImagePoint {
    type Output = ImagePoint;

    fn add(self, rhs: ImagePoint) -> ImagePoint {
        ImagePoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ImagePoint {
    type Output = ImagePoint;

    fn sub(self, rhs: ImagePoint) -> ImagePoint {
        ImagePoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i64, i64)> for ImagePoint {
    fn from((x, y): (i64, i64)) -> Self {
        ImagePoint::new(x, y)
    }
}

impl fmt::Display for ImagePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}
