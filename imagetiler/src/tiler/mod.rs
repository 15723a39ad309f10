//! Pixel ↔ geographic conversion for one pinned image.
//!
//! An [`ImageTiler`] knows one "pin": an image pixel paired with its
//! geographic coordinate. Every other pixel is placed by measuring its
//! planar bearing and distance from the pin, converting the distance to
//! meters with a single linear scale, and solving the spherical destination
//! problem from the pin's coordinate. The inverse goes the other way.
//!
//! The scale is derived from a reference tile: the great-circle length of the
//! diagonal of the tile containing the pin, divided by the pixel length of a
//! tile diagonal. This square-tile approximation introduces bounded
//! distortion away from the pin, growing with latitude and distance.

use std::f64::consts::SQRT_2;

use tracing::trace;

use crate::coord::tiles_per_side;
use crate::geo::GeoPoint;
use crate::loader::TilesLoader;
use crate::raster::{ImagePoint, PixelRect, PixelSize};
use crate::tile::TileInfo;

/// Meters per image pixel for an image whose tiles of `tile_size` pixels
/// match slippy-map tiles at `zoom` around `pin_geo`.
pub fn reference_scale(pin_geo: &GeoPoint, zoom: u8, tile_size: f64) -> f64 {
    let tile = TileInfo::from_geo(pin_geo, zoom);
    tile.diagonal_m() / (tile_size * SQRT_2)
}

/// Converts between image pixels and geographic coordinates around a pin.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTiler {
    pin_geo: GeoPoint,
    pin_point: ImagePoint,
    zoom: u8,
    /// Image pixels covered by one tile edge at `zoom`
    tile_size: f64,
    meters_per_pixel: f64,
    first_tile: TileInfo,
    first_tile_position: ImagePoint,
}

impl ImageTiler {
    /// Creates a tiler whose scale is derived from the reference tile at `zoom`.
    ///
    /// # Arguments
    ///
    /// * `pin_geo` - Geographic position of the pin
    /// * `pin_point` - Pixel position of the pin on the image
    /// * `zoom` - Zoom level the image tiles are cut at
    /// * `tile_size` - Edge of one tile in image pixels
    pub fn new(pin_geo: GeoPoint, pin_point: ImagePoint, zoom: u8, tile_size: u32) -> Self {
        let tile_size = tile_size as f64;
        let scale = reference_scale(&pin_geo, zoom, tile_size);
        Self::with_scale(pin_geo, pin_point, zoom, tile_size, scale)
    }

    /// Creates a tiler with an explicit scale.
    ///
    /// `tile_size` may be fractional, e.g. when a zoom level deeper than the
    /// image's native zoom maps each tile to fewer image pixels than the
    /// output tile has.
    pub fn with_scale(
        pin_geo: GeoPoint,
        pin_point: ImagePoint,
        zoom: u8,
        tile_size: f64,
        meters_per_pixel: f64,
    ) -> Self {
        let mut tiler = Self {
            pin_geo,
            pin_point,
            zoom,
            tile_size,
            meters_per_pixel,
            first_tile: TileInfo::new(0, 0, zoom),
            first_tile_position: ImagePoint::default(),
        };
        tiler.first_tile = tiler.tile_at(&ImagePoint::new(0, 0));
        tiler.first_tile_position = tiler.image_position(&tiler.first_tile.top_left());
        tiler.align_first_tile();

        trace!(
            zoom,
            tile_size,
            meters_per_pixel,
            first_tile = %tiler.first_tile,
            first_tile_position = %tiler.first_tile_position,
            "Created image tiler"
        );
        tiler
    }

    /// Shifts the first tile by whole grid steps until its span holds pixel
    /// `(0, 0)`.
    ///
    /// Far from the pin the geographic tile of a pixel and the pixel grid can
    /// disagree by a few pixels.
    fn align_first_tile(&mut self) {
        let step = (self.tile_size.round() as i64).max(1);
        let last = tiles_per_side(self.zoom) as i64 - 1;
        let align = |index: u32, position: i64| {
            let index = index as i64;
            let shift = if position > 0 {
                -((position + step - 1) / step).min(index)
            } else {
                ((-position) / step).min(last - index)
            };
            (index + shift, position + shift * step)
        };

        let (x, position_x) = align(self.first_tile.x(), self.first_tile_position.x());
        let (y, position_y) = align(self.first_tile.y(), self.first_tile_position.y());
        self.first_tile = TileInfo::new(x as u32, y as u32, self.zoom);
        self.first_tile_position = ImagePoint::new(position_x, position_y);
    }

    pub fn pin_geo(&self) -> GeoPoint {
        self.pin_geo
    }

    pub fn pin_point(&self) -> ImagePoint {
        self.pin_point
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Image pixels per tile edge.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Meters represented by one image pixel.
    pub fn meters_per_pixel(&self) -> f64 {
        self.meters_per_pixel
    }

    /// Geographic position of an image pixel.
    pub fn geo_position(&self, point: &ImagePoint) -> GeoPoint {
        let distance = self.pin_point.distance_to(point) * self.meters_per_pixel;
        let bearing = self.pin_point.bearing_to(point);
        self.pin_geo.destination(bearing, distance)
    }

    /// Image pixel of a geographic position, rounded to the nearest pixel.
    pub fn image_position(&self, point: &GeoPoint) -> ImagePoint {
        let distance = self.pin_geo.distance_to(point) / self.meters_per_pixel;
        let bearing = self.pin_geo.bearing_to(point);
        self.pin_point.destination(bearing, distance)
    }

    /// The tile containing an image pixel.
    pub fn tile_at(&self, point: &ImagePoint) -> TileInfo {
        TileInfo::from_geo(&self.geo_position(point), self.zoom)
    }

    /// The tile containing image pixel `(0, 0)`.
    pub fn first_tile(&self) -> TileInfo {
        self.first_tile
    }

    /// Image position of the first tile's north-west corner.
    ///
    /// Usually negative on one or both axes, as tiles are not aligned to the
    /// image corners.
    pub fn first_tile_position(&self) -> ImagePoint {
        self.first_tile_position
    }

    /// Image position of a tile's north-west corner.
    ///
    /// Positions are laid out on a regular grid of `tile_size` pixels starting
    /// at the first tile, so neighbouring tiles never overlap or leave gaps.
    pub fn tile_position(&self, tile: &TileInfo) -> ImagePoint {
        let (dx, dy) = self.grid_offset(tile);
        self.grid_position(dx, dy)
    }

    /// Image pixels covered by a tile, unclipped.
    ///
    /// The rectangle ends where the next grid tile starts, so the rectangles
    /// of neighbouring tiles tile the plane even for fractional tile sizes.
    pub fn tile_rect(&self, tile: &TileInfo) -> PixelRect {
        let (dx, dy) = self.grid_offset(tile);
        PixelRect::from_corners(
            self.grid_position(dx, dy),
            self.grid_position(dx + 1.0, dy + 1.0),
        )
    }

    /// The grid tile holding the image's bottom-right pixel.
    pub fn last_tile(&self, image_size: PixelSize) -> TileInfo {
        let origin = self.first_tile_position;
        let columns = self.grid_steps(origin.x(), image_size.width as i64);
        let rows = self.grid_steps(origin.y(), image_size.height as i64);
        self.first_tile.neighbor(columns - 1, rows - 1)
    }

    /// A loader over every tile touching an image of `image_size`.
    ///
    /// The box runs from the first tile's north-west corner to the north-west
    /// corner of [`ImageTiler::last_tile`].
    pub fn tiles_loader(&self, image_size: PixelSize) -> TilesLoader {
        let last_tile = self.last_tile(image_size);
        TilesLoader::new(
            self.first_tile.top_left(),
            last_tile.top_left(),
            self.zoom,
            self.zoom,
        )
    }

    fn grid_offset(&self, tile: &TileInfo) -> (f64, f64) {
        (
            tile.x() as f64 - self.first_tile.x() as f64,
            tile.y() as f64 - self.first_tile.y() as f64,
        )
    }

    fn grid_position(&self, dx: f64, dy: f64) -> ImagePoint {
        self.first_tile_position
            + ImagePoint::new(
                (dx * self.tile_size).round() as i64,
                (dy * self.tile_size).round() as i64,
            )
    }

    /// Grid tiles needed along one axis to go from `origin` past `extent`.
    fn grid_steps(&self, origin: i64, extent: i64) -> i64 {
        if self.tile_size <= 0.0 || extent <= origin {
            return 1;
        }
        let end = |steps: i64| origin + (steps as f64 * self.tile_size).round() as i64;
        let mut steps = (((extent - origin) as f64) / self.tile_size).ceil().max(1.0) as i64;
        while end(steps) < extent {
            steps += 1;
        }
        while steps > 1 && end(steps - 1) >= extent {
            steps -= 1;
        }
        steps
    }
}
