//! Tile enumeration over a geographic bounding box.
//!
//! [`TilesLoader`] turns a box and a zoom range into the tiles covering it.
//! For each zoom level the box corners are projected to tile indices; when a
//! minimum viewport is configured and the box is smaller than the viewport,
//! the window is grown symmetrically by whole tiles so a viewer showing the
//! area never runs off the tiled region.
//!
//! ```text
//!         padded window
//!   ┌───┬───┬───┬───┬───┐
//!   │ · │ · │ · │ · │ · │
//!   ├───┼───┼───┼───┼───┤
//!   │ · │ ■ │ ■ │ ■ │ · │   ■ = tiles covering the box
//!   ├───┼───┼───┼───┼───┤   · = viewport padding
//!   │ · │ ■ │ ■ │ ■ │ · │
//!   ├───┼───┼───┼───┼───┤
//!   │ · │ · │ · │ · │ · │
//!   └───┴───┴───┴───┴───┘
//! ```
//!
//! Tiles are produced lazily, zoom by zoom, with `x` as the outer and `y`
//! as the inner loop.

use std::iter;
use std::ops::RangeInclusive;

use tracing::debug;

use crate::coord::DEFAULT_TILE_SIZE;
use crate::geo::GeoPoint;
use crate::raster::PixelSize;
use crate::tile::{TileInfo, TileWindow, TileWindowIter};

/// Tiles of one zoom level, before and after viewport padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadWindow {
    /// Tiles to produce, including padding
    pub tiles: TileWindow,
    /// Tiles covering the box itself
    pub area: TileWindow,
    /// North-west corner of the box
    pub top_left: GeoPoint,
    /// South-east corner of the box
    pub bottom_right: GeoPoint,
}

impl LoadWindow {
    pub fn zoom(&self) -> u8 {
        self.tiles.zoom()
    }

    /// Returns `true` if padding was added around the box.
    pub fn is_padded(&self) -> bool {
        self.tiles != self.area
    }
}

/// One step of a load, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadEvent {
    /// Start of a zoom level
    Begin(LoadWindow),
    /// A tile inside the current window
    Tile(TileInfo),
    /// End of a zoom level
    End(LoadWindow),
}

/// Enumerates the tiles covering a bounding box across a zoom range.
///
/// The loader holds only configuration; every call to [`TilesLoader::iter`],
/// [`TilesLoader::windows`] or [`TilesLoader::events`] starts afresh.
///
/// # Example
///
/// ```
/// use imagetiler::geo::GeoPoint;
/// use imagetiler::loader::TilesLoader;
///
/// let loader = TilesLoader::new(
///     GeoPoint::new(10.951, 49.5611),
///     GeoPoint::new(11.0574, 49.6282),
///     13,
///     14,
/// );
/// assert_eq!(loader.iter().count(), 9 + 36);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TilesLoader {
    top_left: GeoPoint,
    bottom_right: GeoPoint,
    min_zoom: u8,
    max_zoom: u8,
    viewport: Option<PixelSize>,
    tile_size: u32,
}

impl TilesLoader {
    /// Creates a loader for the box spanned by two points.
    ///
    /// The points may be given in any order, as may the zoom bounds.
    pub fn new(a: GeoPoint, b: GeoPoint, min_zoom: u8, max_zoom: u8) -> Self {
        let min = GeoPoint::min(&a, &b);
        let max = GeoPoint::max(&a, &b);
        Self {
            top_left: GeoPoint::new(min.lon(), max.lat()),
            bottom_right: GeoPoint::new(max.lon(), min.lat()),
            min_zoom: min_zoom.min(max_zoom),
            max_zoom: min_zoom.max(max_zoom),
            viewport: None,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    /// Pads each zoom level so that it covers at least `viewport` pixels
    /// of `tile_size`-pixel tiles.
    pub fn with_viewport(mut self, viewport: PixelSize, tile_size: u32) -> Self {
        self.viewport = Some(viewport);
        self.tile_size = tile_size.max(1);
        self
    }

    /// North-west corner of the box.
    pub fn top_left(&self) -> GeoPoint {
        self.top_left
    }

    /// South-east corner of the box.
    pub fn bottom_right(&self) -> GeoPoint {
        self.bottom_right
    }

    pub fn viewport(&self) -> Option<PixelSize> {
        self.viewport
    }

    /// Zoom levels covered, lowest first.
    pub fn zoom_range(&self) -> RangeInclusive<u8> {
        self.min_zoom..=self.max_zoom
    }

    /// The tile window of one zoom level.
    pub fn window(&self, zoom: u8) -> LoadWindow {
        let area = TileWindow::new(
            TileInfo::from_geo(&self.top_left, zoom),
            TileInfo::from_geo(&self.bottom_right, zoom),
        );
        let tiles = match self.viewport {
            Some(viewport) => self.pad(area, viewport),
            None => area,
        };

        LoadWindow {
            tiles,
            area,
            top_left: self.top_left,
            bottom_right: self.bottom_right,
        }
    }

    /// Grows `area` symmetrically until it spans the viewport.
    fn pad(&self, area: TileWindow, viewport: PixelSize) -> TileWindow {
        let tile_size = self.tile_size as i64;
        let span_x = (area.last().x() - area.first().x()) as i64 * tile_size;
        let span_y = (area.last().y() - area.first().y()) as i64 * tile_size;
        let delta_x = (viewport.width as i64 - span_x).max(0);
        let delta_y = (viewport.height as i64 - span_y).max(0);
        if delta_x == 0 && delta_y == 0 {
            return area;
        }

        // Half of the missing pixels on each side, in whole tiles
        let tiles_for = |pixels: i64| (pixels + tile_size - 1) / tile_size;
        let pad_x = tiles_for((delta_x + 1) / 2);
        let pad_y = tiles_for((delta_y + 1) / 2);

        TileWindow::new(
            area.first().neighbor(-pad_x, -pad_y),
            area.last().neighbor(pad_x, pad_y),
        )
    }

    /// One window per zoom level, lowest zoom first.
    pub fn windows(&self) -> impl Iterator<Item = LoadWindow> + '_ {
        self.zoom_range().map(move |zoom| {
            let window = self.window(zoom);
            debug!(
                zoom,
                first = %window.tiles.first(),
                last = %window.tiles.last(),
                tiles = window.tiles.len(),
                padded = window.is_padded(),
                "Tile window"
            );
            window
        })
    }

    /// All tiles, zoom by zoom.
    pub fn iter(&self) -> TilesIter<'_> {
        TilesIter {
            loader: self,
            zooms: self.zoom_range(),
            current: None,
        }
    }

    /// The full event stream: `Begin`, the tiles, then `End`, per zoom level.
    pub fn events(&self) -> impl Iterator<Item = LoadEvent> + '_ {
        self.windows().flat_map(|window| {
            iter::once(LoadEvent::Begin(window))
                .chain(window.tiles.iter().map(LoadEvent::Tile))
                .chain(iter::once(LoadEvent::End(window)))
        })
    }

    /// Total number of tiles across all zoom levels.
    pub fn tile_count(&self) -> usize {
        self.zoom_range().map(|z| self.window(z).tiles.len()).sum()
    }
}

impl<'a> IntoIterator for &'a TilesLoader {
    type Item = TileInfo;
    type IntoIter = TilesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the tiles of a [`TilesLoader`].
pub struct TilesIter<'a> {
    loader: &'a TilesLoader,
    zooms: RangeInclusive<u8>,
    current: Option<TileWindowIter>,
}

impl Iterator for TilesIter<'_> {
    type Item = TileInfo;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tile) = self.current.as_mut().and_then(|it| it.next()) {
                return Some(tile);
            }
            let zoom = self.zooms.next()?;
            self.current = Some(self.loader.window(zoom).tiles.iter());
        }
    }
}
