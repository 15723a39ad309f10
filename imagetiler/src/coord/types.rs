//! Constants and small types shared by the tile math.

/// Minimum zoom level.
pub const MIN_ZOOM: u8 = 0;

/// Maximum supported zoom level.
///
/// Tile indices are `u32`, so `2^MAX_ZOOM` tiles per side must fit.
pub const MAX_ZOOM: u8 = 30;

/// Default tile edge in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Default tile file extension.
pub const DEFAULT_EXTENSION: &str = "png";

/// Tolerance added to the projected tile position before flooring.
///
/// The inverse projection of a tile corner can land a few ulps short of the
/// integer boundary, which would otherwise put the corner in the previous
/// tile.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Which geographic axis a projection works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// East-west position, projected to the tile X index.
    Longitude,
    /// North-south position, projected to the tile Y index.
    Latitude,
}
