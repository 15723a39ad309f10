//! Per-tile copy plans.

use image::RgbaImage;

use crate::raster::{new_canvas, ImagePoint, ImageSource, PixelRect, PixelSize};
use crate::tile::TileInfo;
use crate::tiler::ImageTiler;

use super::PyramidConfig;

/// What to copy from the source image into one output tile.
///
/// `source` is in image pixels and already clipped to the image; `target`
/// is in tile pixels. A partial tile at the image edge has a `target` that
/// covers only part of the tile, leaving the rest to the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCopy {
    pub tile: TileInfo,
    /// Image position of the tile's north-west corner
    pub position: ImagePoint,
    pub source: PixelRect,
    pub target: PixelRect,
}

impl TileCopy {
    /// Plans the copy for `tile`.
    ///
    /// # Arguments
    ///
    /// * `tiler` - Tiler of the tile's zoom level
    /// * `image_size` - Size of the source image
    /// * `scale_factor` - Image pixels per output pixel at this zoom
    /// * `tile_size` - Edge of the output tile
    pub fn plan(
        tiler: &ImageTiler,
        tile: TileInfo,
        image_size: PixelSize,
        scale_factor: f64,
        tile_size: u32,
    ) -> Self {
        let position = tiler.tile_position(&tile);
        let source = tiler
            .tile_rect(&tile)
            .intersect(&PixelRect::from_size(image_size));

        if source.is_empty() {
            return Self {
                tile,
                position,
                source,
                target: PixelRect::default(),
            };
        }

        let tile_size = tile_size as i64;
        let to_target = |offset: i64| (offset as f64 / scale_factor).round() as i64;
        let target = PixelRect::new(
            to_target(source.left - position.x()),
            to_target(source.top - position.y()),
            to_target(source.right - position.x()).min(tile_size),
            to_target(source.bottom - position.y()).min(tile_size),
        );

        Self {
            tile,
            position,
            source,
            target,
        }
    }

    /// Returns `true` if no image pixel lands on the tile.
    pub fn is_blank(&self) -> bool {
        self.source.is_empty() || self.target.is_empty()
    }

    /// Returns `true` if the image covers the whole tile.
    pub fn is_full(&self, tile_size: u32) -> bool {
        let size = tile_size as i64;
        self.target == PixelRect::new(0, 0, size, size)
    }

    /// Renders the tile: background fill, then the image copy.
    pub fn render<S>(&self, source: &S, config: &PyramidConfig) -> RgbaImage
    where
        S: ImageSource + ?Sized,
    {
        let mut canvas = new_canvas(config.tile_size, config.background, config.format);
        if !self.is_blank() {
            source.copy_rect(self.source, &mut canvas, self.target);
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    /// Tiler at the equator whose grid starts `offset` pixels before the image.
    fn aligned_tiler(offset: i64, zoom: u8, tile_size: f64) -> ImageTiler {
        let base = ImageTiler::new(GeoPoint::new(0.0, 0.0), ImagePoint::new(0, 0), 13, 256);
        ImageTiler::with_scale(
            base.pin_geo(),
            ImagePoint::new(offset, offset),
            zoom,
            tile_size,
            base.meters_per_pixel(),
        )
    }

    #[test]
    fn test_interior_tile_is_full() {
        let tiler = aligned_tiler(0, 13, 256.0);
        let first = tiler.first_tile();
        let tile = TileInfo::new(first.x() + 1, first.y() + 1, 13);
        let copy = TileCopy::plan(&tiler, tile, PixelSize::new(1024, 1024), 1.0, 256);

        assert_eq!(copy.position, ImagePoint::new(256, 256));
        assert_eq!(copy.source, PixelRect::new(256, 256, 512, 512));
        assert!(copy.is_full(256));
    }

    #[test]
    fn test_partial_tile_at_top_left() {
        // Grid starts 245 pixels before the image on both axes
        let tiler = aligned_tiler(11, 13, 256.0);
        let copy = TileCopy::plan(&tiler, tiler.first_tile(), PixelSize::new(1000, 1000), 1.0, 256);

        assert_eq!(copy.position, ImagePoint::new(-245, -245));
        assert_eq!(copy.source, PixelRect::new(0, 0, 11, 11));
        assert_eq!(copy.target, PixelRect::new(245, 245, 256, 256));
        assert!(!copy.is_blank());
        assert!(!copy.is_full(256));
    }

    #[test]
    fn test_partial_tile_at_bottom_right() {
        let tiler = aligned_tiler(0, 13, 256.0);
        let first = tiler.first_tile();
        let tile = TileInfo::new(first.x() + 3, first.y() + 3, 13);
        let copy = TileCopy::plan(&tiler, tile, PixelSize::new(800, 900), 1.0, 256);

        assert_eq!(copy.source, PixelRect::new(768, 768, 800, 900));
        assert_eq!(copy.target, PixelRect::new(0, 0, 32, 132));
    }

    #[test]
    fn test_downscaled_tile() {
        // One zoom level above native: each output pixel covers 2 image pixels
        let tiler = aligned_tiler(0, 12, 512.0);
        let copy = TileCopy::plan(&tiler, tiler.first_tile(), PixelSize::new(700, 300), 2.0, 256);

        assert_eq!(copy.source, PixelRect::new(0, 0, 512, 300));
        assert_eq!(copy.target, PixelRect::new(0, 0, 256, 150));
    }

    #[test]
    fn test_upscaled_tile() {
        // One zoom level below native: 128 image pixels fill a 256 pixel tile
        let tiler = aligned_tiler(0, 14, 128.0);
        let first = tiler.first_tile();
        let tile = TileInfo::new(first.x() + 1, first.y(), 14);
        let copy = TileCopy::plan(&tiler, tile, PixelSize::new(200, 200), 0.5, 256);

        assert_eq!(copy.source, PixelRect::new(128, 0, 200, 128));
        assert_eq!(copy.target, PixelRect::new(0, 0, 144, 256));
    }

    #[test]
    fn test_tile_outside_image_is_blank() {
        let tiler = aligned_tiler(0, 13, 256.0);
        let first = tiler.first_tile();
        let tile = TileInfo::new(first.x() + 5, first.y(), 13);
        let copy = TileCopy::plan(&tiler, tile, PixelSize::new(300, 300), 1.0, 256);
        assert!(copy.is_blank());
        assert!(copy.target.is_empty());
    }
}
