//! Pyramid generation settings.

use crate::coord::DEFAULT_TILE_SIZE;
use crate::raster::{Background, PixelSize, TileFormat};

/// Number of tiles rendered together when parallel rendering is enabled.
///
/// Tiles of a batch are rendered concurrently and then handed to the sink
/// one by one in enumeration order.
pub const PARALLEL_BATCH_SIZE: usize = 64;

/// Settings for a [`super::PyramidGenerator`].
///
/// # Example
///
/// ```
/// use imagetiler::pyramid::PyramidConfig;
/// use imagetiler::raster::{PixelSize, TileFormat};
///
/// let config = PyramidConfig::default()
///     .with_format(TileFormat::Jpg)
///     .with_viewport(PixelSize::new(1024, 768));
/// assert_eq!(config.tile_size, 256);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidConfig {
    /// Edge of one output tile in pixels.
    pub tile_size: u32,

    /// Encoding handed to the sink with every tile.
    pub format: TileFormat,

    /// Fill for pixels not covered by the image.
    pub background: Background,

    /// Minimum area in pixels every zoom level must cover, if any.
    pub viewport: Option<PixelSize>,

    /// Deliver padding tiles that lie entirely outside the image.
    pub emit_blank_tiles: bool,

    /// Render tiles of a zoom level on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            format: TileFormat::default(),
            background: Background::default(),
            viewport: None,
            emit_blank_tiles: false,
            parallel: false,
        }
    }
}

impl PyramidConfig {
    /// Set the output tile size. Zero is raised to one pixel.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size.max(1);
        self
    }

    /// Set the tile encoding.
    pub fn with_format(mut self, format: TileFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the background fill.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Set the minimum viewport.
    pub fn with_viewport(mut self, viewport: PixelSize) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Deliver tiles lying entirely outside the image.
    pub fn with_blank_tiles(mut self, emit: bool) -> Self {
        self.emit_blank_tiles = emit;
        self
    }

    /// Enable or disable parallel rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_defaults() {
        let config = PyramidConfig::default();
        assert_eq!(config.tile_size, 256);
        assert_eq!(config.format, TileFormat::Png);
        assert_eq!(config.background, Background::Auto);
        assert!(config.viewport.is_none());
        assert!(!config.emit_blank_tiles);
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder() {
        let config = PyramidConfig::default()
            .with_tile_size(512)
            .with_format(TileFormat::Jpg)
            .with_background(Background::Color(Rgba([255, 255, 255, 255])))
            .with_viewport(PixelSize::new(400, 500))
            .with_blank_tiles(true)
            .with_parallel(true);

        assert_eq!(config.tile_size, 512);
        assert_eq!(config.format, TileFormat::Jpg);
        assert_eq!(config.viewport, Some(PixelSize::new(400, 500)));
        assert!(config.emit_blank_tiles);
        assert!(config.parallel);
    }

    #[test]
    fn test_zero_tile_size_is_raised() {
        assert_eq!(PyramidConfig::default().with_tile_size(0).tile_size, 1);
    }
}
