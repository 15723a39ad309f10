//! Pixel rectangles and sizes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ImagePoint;

/// Width and height of an image or viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The bottom-right corner `(width, height)` as an image point.
    pub fn as_point(&self) -> ImagePoint {
        ImagePoint::new(self.width as i64, self.height as i64)
    }

    /// Both sides divided by `2^shift`.
    pub fn shrink(&self, shift: u32) -> PixelSize {
        PixelSize::new(
            self.width.checked_shr(shift).unwrap_or(0),
            self.height.checked_shr(shift).unwrap_or(0),
        )
    }

    /// Parses `"<width>x<height>"`, e.g. `"1024x768"`.
    pub fn parse(value: &str) -> Option<PixelSize> {
        let (w, h) = value.trim().split_once(['x', 'X'])?;
        Some(PixelSize::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A half-open pixel rectangle `[left, right) × [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl PixelRect {
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanned by two corner points.
    pub fn from_corners(top_left: ImagePoint, bottom_right: ImagePoint) -> Self {
        Self::new(top_left.x(), top_left.y(), bottom_right.x(), bottom_right.y())
    }

    /// Rectangle covering a whole image of `size`.
    pub fn from_size(size: PixelSize) -> Self {
        Self::new(0, 0, size.width as i64, size.height as i64)
    }

    pub fn top_left(&self) -> ImagePoint {
        ImagePoint::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> ImagePoint {
        ImagePoint::new(self.right, self.bottom)
    }

    /// Width, or 0 if the rectangle is inverted.
    pub fn width(&self) -> i64 {
        (self.right - self.left).max(0)
    }

    /// Height, or 0 if the rectangle is inverted.
    pub fn height(&self) -> i64 {
        (self.bottom - self.top).max(0)
    }

    /// Returns `true` if the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Overlap of two rectangles; empty if they do not intersect.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        PixelRect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})x[{}, {})",
            self.left, self.right, self.top, self.bottom
        )
    }
}
