//! Tile identity and geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::{
    lat_to_tile_y, lon_to_tile_x, tile_corner_latitude, tile_corner_longitude, tile_path,
    tiles_per_side, MAX_ZOOM,
};
use crate::geo::GeoPoint;

/// A named corner of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl TileCorner {
    /// Index offsets `(dx, dy)` of this corner relative to the tile origin.
    fn offsets(self) -> (u32, u32) {
        match self {
            TileCorner::TopLeft => (0, 0),
            TileCorner::TopRight => (1, 0),
            TileCorner::BottomLeft => (0, 1),
            TileCorner::BottomRight => (1, 1),
        }
    }
}

/// One slippy-map tile, identified by `(x, y, zoom)`.
///
/// `x` grows eastwards from the antimeridian and `y` grows southwards from
/// the northern edge of the Web Mercator band. Two tiles with the same triple
/// are interchangeable.
///
/// # Example
///
/// ```
/// use imagetiler::geo::GeoPoint;
/// use imagetiler::tile::TileInfo;
///
/// let tile = TileInfo::from_geo(&GeoPoint::new(11.01296, 49.60055), 13);
/// assert_eq!((tile.x(), tile.y(), tile.zoom()), (4346, 2792, 13));
/// assert_eq!(tile.path("png"), "13/4346/2792.png");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileInfo {
    /// Zoom level
    zoom: u8,
    /// Column (X index)
    x: u32,
    /// Row (Y index)
    y: u32,
}

impl TileInfo {
    /// Creates a tile from its indices.
    ///
    /// Zoom levels above [`MAX_ZOOM`] are reduced to `MAX_ZOOM`.
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self {
            zoom: zoom.min(MAX_ZOOM),
            x,
            y,
        }
    }

    /// The tile containing `point` at `zoom`.
    pub fn from_geo(point: &GeoPoint, zoom: u8) -> Self {
        Self::new(
            lon_to_tile_x(point.lon(), zoom),
            lat_to_tile_y(point.lat(), zoom),
            zoom,
        )
    }

    /// Get the column.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Get the row.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Get the zoom level.
    #[inline]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Geographic position of one of the tile corners.
    ///
    /// Corners on the world edge are clamped into the valid band by
    /// [`GeoPoint::new`].
    pub fn corner(&self, corner: TileCorner) -> GeoPoint {
        let (dx, dy) = corner.offsets();
        GeoPoint::new(
            tile_corner_longitude(self.x.saturating_add(dx), self.zoom),
            tile_corner_latitude(self.y.saturating_add(dy), self.zoom),
        )
    }

    /// North-west corner.
    pub fn top_left(&self) -> GeoPoint {
        self.corner(TileCorner::TopLeft)
    }

    /// South-east corner.
    pub fn bottom_right(&self) -> GeoPoint {
        self.corner(TileCorner::BottomRight)
    }

    /// The tile shifted by `(dx, dy)` indices at the same zoom.
    ///
    /// Shifts past the edge of the world stop at the first or last row/column.
    pub fn neighbor(&self, dx: i64, dy: i64) -> TileInfo {
        let last = tiles_per_side(self.zoom) as i64 - 1;
        let x = (self.x as i64 + dx).clamp(0, last);
        let y = (self.y as i64 + dy).clamp(0, last);
        TileInfo::new(x as u32, y as u32, self.zoom)
    }

    /// The tile shifted by `(dx, dy)` and then re-projected to `zoom`.
    ///
    /// The zoom change goes through the shifted tile's north-west corner, not
    /// through index arithmetic.
    pub fn neighbor_at(&self, dx: i64, dy: i64, zoom: u8) -> TileInfo {
        self.neighbor(dx, dy).with_zoom(zoom)
    }

    /// The tile at `zoom` containing this tile's north-west corner.
    pub fn with_zoom(&self, zoom: u8) -> TileInfo {
        if zoom == self.zoom {
            return *self;
        }
        TileInfo::from_geo(&self.top_left(), zoom)
    }

    /// Next tile eastwards.
    pub fn next_x(&self) -> TileInfo {
        self.neighbor(1, 0)
    }

    /// Next tile southwards.
    pub fn next_y(&self) -> TileInfo {
        self.neighbor(0, 1)
    }

    /// Previous tile westwards.
    pub fn prev_x(&self) -> TileInfo {
        self.neighbor(-1, 0)
    }

    /// Previous tile northwards.
    pub fn prev_y(&self) -> TileInfo {
        self.neighbor(0, -1)
    }

    /// Returns `true` if `point` lies on this tile.
    ///
    /// The west and north edges belong to the tile; the east and south edges
    /// belong to the next column and row. The test is evaluated with the same
    /// projection as [`TileInfo::from_geo`], so `TileInfo::from_geo(p, z)`
    /// always contains `p`.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        lon_to_tile_x(point.lon(), self.zoom) == self.x
            && lat_to_tile_y(point.lat(), self.zoom) == self.y
    }

    /// The `{zoom}/{x}/{y}.{ext}` path of this tile.
    pub fn path(&self, ext: &str) -> String {
        tile_path(self.x, self.y, self.zoom, ext)
    }

    /// East-west extent of the tile along its northern edge, in meters.
    pub fn width_m(&self) -> f64 {
        self.top_left().distance_to(&self.corner(TileCorner::TopRight))
    }

    /// North-south extent of the tile along its western edge, in meters.
    pub fn height_m(&self) -> f64 {
        self.top_left().distance_to(&self.corner(TileCorner::BottomLeft))
    }

    /// Diagonal extent from the north-west to the south-east corner, in meters.
    pub fn diagonal_m(&self) -> f64 {
        self.top_left().distance_to(&self.bottom_right())
    }

    /// Number of `(columns, rows)` in the window spanned by two tiles.
    ///
    /// Both tiles are counted; the order of the arguments does not matter.
    pub fn tile_count_between(a: &TileInfo, b: &TileInfo) -> (u32, u32) {
        (a.x.abs_diff(b.x) + 1, a.y.abs_diff(b.y) + 1)
    }

    /// Number of `(columns, rows)` covering the box spanned by two points at `zoom`.
    pub fn tile_count_in_area(a: &GeoPoint, b: &GeoPoint, zoom: u8) -> (u32, u32) {
        Self::tile_count_between(&Self::from_geo(a, zoom), &Self::from_geo(b, zoom))
    }
}

impl fmt::Display for TileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_geo_known_fixture() {
        let tile = TileInfo::from_geo(&GeoPoint::new(11.01296, 49.60055), 13);
        assert_eq!(tile, TileInfo::new(4346, 2792, 13));
        assert_eq!(tile.to_string(), "13/4346/2792");
    }

    #[test]
    fn test_zoom_is_capped() {
        assert_eq!(TileInfo::new(0, 0, 99).zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_corners_bracket_the_tile() {
        let tile = TileInfo::new(4346, 2792, 13);
        let tl = tile.top_left();
        let br = tile.bottom_right();
        assert!(tl.lon() < br.lon());
        assert!(tl.lat() > br.lat());

        let tr = tile.corner(TileCorner::TopRight);
        let bl = tile.corner(TileCorner::BottomLeft);
        assert_eq!(tr.lon(), br.lon());
        assert_eq!(tr.lat(), tl.lat());
        assert_eq!(bl.lon(), tl.lon());
        assert_eq!(bl.lat(), br.lat());
    }

    #[test]
    fn test_top_left_corner_is_contained() {
        let tile = TileInfo::new(4346, 2792, 13);
        assert!(tile.contains(&tile.top_left()));
        // The south-east corner belongs to the diagonal neighbour
        assert!(!tile.contains(&tile.bottom_right()));
        assert!(tile.neighbor(1, 1).contains(&tile.bottom_right()));
    }

    #[test]
    fn test_neighbors() {
        let tile = TileInfo::new(10, 20, 8);
        assert_eq!(tile.next_x(), TileInfo::new(11, 20, 8));
        assert_eq!(tile.next_y(), TileInfo::new(10, 21, 8));
        assert_eq!(tile.prev_x(), TileInfo::new(9, 20, 8));
        assert_eq!(tile.prev_y(), TileInfo::new(10, 19, 8));
        assert_eq!(tile.neighbor(-3, 4), TileInfo::new(7, 24, 8));
    }

    #[test]
    fn test_neighbor_stops_at_world_edge() {
        let tile = TileInfo::new(0, 3, 2);
        assert_eq!(tile.prev_x(), tile);
        assert_eq!(tile.next_y(), tile);
        assert_eq!(tile.neighbor(10, -10), TileInfo::new(3, 0, 2));
    }

    #[test]
    fn test_with_zoom_goes_through_corner() {
        let tile = TileInfo::new(4346, 2792, 13);
        assert_eq!(tile.with_zoom(14), TileInfo::new(8692, 5584, 14));
        assert_eq!(tile.with_zoom(12), TileInfo::new(2173, 1396, 12));
        assert_eq!(tile.with_zoom(13), tile);
    }

    #[test]
    fn test_neighbor_at_other_zoom() {
        let tile = TileInfo::new(4346, 2792, 13);
        assert_eq!(tile.neighbor_at(1, 1, 14), TileInfo::new(8694, 5586, 14));
    }

    #[test]
    fn test_size_in_meters() {
        // A zoom 0 tile spans the full equator
        let world = TileInfo::new(0, 0, 0);
        assert!(world.width_m() > 0.0);

        let tile = TileInfo::new(4346, 2792, 13);
        // About 4.9 km wide at the equator, shrinking with cos(latitude)
        assert!(tile.width_m() > 3000.0 && tile.width_m() < 3300.0, "{}", tile.width_m());
        assert!(tile.height_m() > 3000.0 && tile.height_m() < 3300.0, "{}", tile.height_m());
        assert!(tile.diagonal_m() > tile.width_m());
    }

    #[test]
    fn test_tile_count_between() {
        let a = TileInfo::new(4345, 2791, 13);
        let b = TileInfo::new(4347, 2793, 13);
        assert_eq!(TileInfo::tile_count_between(&a, &b), (3, 3));
        assert_eq!(TileInfo::tile_count_between(&b, &a), (3, 3));
        assert_eq!(TileInfo::tile_count_between(&a, &a), (1, 1));
    }

    #[test]
    fn test_tile_count_in_area() {
        let a = GeoPoint::new(10.951, 49.6282);
        let b = GeoPoint::new(11.0574, 49.5611);
        assert_eq!(TileInfo::tile_count_in_area(&a, &b, 13), (3, 3));
        assert_eq!(TileInfo::tile_count_in_area(&a, &b, 14), (6, 6));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_tile_contains_its_point(
                lat in -90.0..90.0_f64,
                lon in -190.0..190.0_f64,
                zoom in 0u8..=22
            ) {
                let point = GeoPoint::new(lon, lat);
                let tile = TileInfo::from_geo(&point, zoom);
                prop_assert!(tile.contains(&point), "{} not in {}", point, tile);
            }

            #[test]
            fn test_top_left_maps_back(
                x in 0u32..4096,
                y in 1u32..4096
            ) {
                let tile = TileInfo::new(x, y, 12);
                prop_assert_eq!(TileInfo::from_geo(&tile.top_left(), 12), tile);
            }
        }
    }
}
