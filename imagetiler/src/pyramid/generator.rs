//! Multi-zoom tile generation from one pinned image.
//!
//! The image is cut at its native zoom with one image pixel per output
//! pixel. Every zoom level above or below reuses the same pin and the same
//! meters-per-pixel scale; only the number of image pixels covered by one
//! tile changes:
//!
//! ```text
//!   zoom        scale factor    image px per tile (256 px tiles)
//!   native - 2      4.0              1024
//!   native - 1      2.0               512
//!   native          1.0               256
//!   native + 1      0.5               128
//!   native + 8      1/256               1
//! ```
//!
//! Past the zoom where one tile covers a single image pixel there is nothing
//! left to resample from, so deeper levels are rejected.
//!
//! Each tile copies its clipped image rectangle onto a background canvas,
//! resampling when the factor is not 1, and hands the result to a
//! [`TileSink`].

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{
    PyramidConfig, PyramidError, PyramidPlan, TileCopy, TilesStat, PARALLEL_BATCH_SIZE,
};
use crate::coord::MAX_ZOOM;
use crate::geo::GeoPoint;
use crate::raster::{ImagePoint, ImageSource, PixelSize};
use crate::sink::TileSink;
use crate::tiler::{reference_scale, ImageTiler};

/// Cuts a pinned image into a slippy-map tile pyramid.
///
/// # Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use imagetiler::geo::GeoPoint;
/// use imagetiler::pyramid::PyramidGenerator;
/// use imagetiler::raster::{ImagePoint, RasterImage};
/// use imagetiler::sink::MemoryTileSink;
///
/// let image = RasterImage::new(RgbaImage::from_pixel(600, 400, Rgba([200, 10, 10, 255])));
/// let mut generator = PyramidGenerator::new(
///     GeoPoint::new(2.33535, 48.86709),
///     ImagePoint::new(300, 200),
///     16,
/// );
///
/// let mut sink = MemoryTileSink::new();
/// let stat = generator.generate(15, 16, &image, &mut sink)?;
/// assert_eq!(stat.max_zoom(), Some(16));
/// assert_eq!(stat.tiles(), sink.len());
/// # Ok::<(), imagetiler::pyramid::PyramidError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PyramidGenerator {
    pin_geo: GeoPoint,
    pin_point: ImagePoint,
    native_zoom: u8,
    config: PyramidConfig,
    tilers: HashMap<u8, ImageTiler>,
}

impl PyramidGenerator {
    /// Creates a generator with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `pin_geo` - Geographic position of the pin
    /// * `pin_point` - Pixel position of the pin on the image
    /// * `native_zoom` - Zoom level at which one image pixel is one tile pixel
    pub fn new(pin_geo: GeoPoint, pin_point: ImagePoint, native_zoom: u8) -> Self {
        Self {
            pin_geo,
            pin_point,
            native_zoom: native_zoom.min(MAX_ZOOM),
            config: PyramidConfig::default(),
            tilers: HashMap::new(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: PyramidConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn pin_geo(&self) -> GeoPoint {
        self.pin_geo
    }

    pub fn pin_point(&self) -> ImagePoint {
        self.pin_point
    }

    pub fn native_zoom(&self) -> u8 {
        self.native_zoom
    }

    pub fn config(&self) -> &PyramidConfig {
        &self.config
    }

    pub fn set_pin_point(&mut self, pin_point: ImagePoint) {
        self.pin_point = pin_point;
        self.tilers.clear();
    }

    pub fn set_pin_geo(&mut self, pin_geo: GeoPoint) {
        self.pin_geo = pin_geo;
        self.tilers.clear();
    }

    pub fn set_native_zoom(&mut self, native_zoom: u8) {
        self.native_zoom = native_zoom.min(MAX_ZOOM);
        self.tilers.clear();
    }

    pub fn set_tile_size(&mut self, tile_size: u32) {
        self.config.tile_size = tile_size.max(1);
        self.tilers.clear();
    }

    pub fn set_viewport(&mut self, viewport: Option<PixelSize>) {
        self.config.viewport = viewport;
        self.tilers.clear();
    }

    pub fn set_config(&mut self, config: PyramidConfig) {
        self.config = config;
        self.config.tile_size = self.config.tile_size.max(1);
        self.tilers.clear();
    }

    /// Number of zoom levels with a cached tiler.
    pub fn cached_tilers(&self) -> usize {
        self.tilers.len()
    }

    /// Image pixels per output pixel at `zoom`: `2^(native - zoom)`.
    ///
    /// Greater than 1 above the native zoom (downsampling), fractional below
    /// it (upsampling).
    pub fn scale_factor(&self, zoom: u8) -> f64 {
        2f64.powi(self.native_zoom as i32 - zoom as i32)
    }

    /// Deepest zoom whose tiles still cover at least one image pixel.
    ///
    /// Each level past the native zoom halves the image pixels per tile, so
    /// this is `native + log2(tile_size)`, capped at [`MAX_ZOOM`].
    pub fn deepest_zoom(&self) -> u8 {
        let depth = self.config.tile_size.max(1).ilog2();
        (self.native_zoom as u32 + depth).min(MAX_ZOOM as u32) as u8
    }

    fn check_depth(&self, zoom: u8) -> Result<(), PyramidError> {
        let deepest_zoom = self.deepest_zoom();
        if zoom > deepest_zoom {
            return Err(PyramidError::ZoomTooDeep {
                zoom,
                native_zoom: self.native_zoom,
                deepest_zoom,
            });
        }
        Ok(())
    }

    /// The tiler for `zoom`, created on first use and cached until a
    /// parameter changes.
    pub fn image_tiler(&mut self, zoom: u8) -> &ImageTiler {
        let zoom = zoom.min(MAX_ZOOM);
        let tile_size = self.config.tile_size as f64;
        let source_tile_size = tile_size * self.scale_factor(zoom);
        let pin_geo = self.pin_geo;
        let pin_point = self.pin_point;
        let native_zoom = self.native_zoom;

        self.tilers.entry(zoom).or_insert_with(|| {
            let meters_per_pixel = reference_scale(&pin_geo, native_zoom, tile_size);
            ImageTiler::with_scale(pin_geo, pin_point, zoom, source_tile_size, meters_per_pixel)
        })
    }

    /// Lowest zoom at which the scaled image still covers the viewport.
    ///
    /// Walks down from `max_zoom`, halving the image per level, and stops
    /// before the first level where either side drops below the viewport.
    /// Without a viewport, or when the image is already smaller than the
    /// viewport at `max_zoom`, returns `max_zoom`.
    pub fn min_zoom_for_viewport(&self, max_zoom: u8, image_size: PixelSize) -> u8 {
        let Some(viewport) = self.config.viewport else {
            return max_zoom;
        };

        let mut min_zoom = max_zoom;
        for zoom in (0..=max_zoom).rev() {
            let scaled = image_size.shrink((max_zoom - zoom) as u32);
            if scaled.width < viewport.width || scaled.height < viewport.height {
                break;
            }
            min_zoom = zoom;
        }
        min_zoom
    }

    /// Copy plans for every tile of `zoom`, in loader order.
    ///
    /// Includes padding tiles when a viewport is configured; those outside
    /// the image come back blank.
    ///
    /// # Errors
    ///
    /// [`PyramidError::ZoomTooDeep`] past [`PyramidGenerator::deepest_zoom`].
    pub fn plan_zoom(
        &mut self,
        zoom: u8,
        image_size: PixelSize,
    ) -> Result<Vec<TileCopy>, PyramidError> {
        self.check_depth(zoom)?;
        let factor = self.scale_factor(zoom);
        let tile_size = self.config.tile_size;
        let viewport = self.config.viewport;
        let tiler = self.image_tiler(zoom).clone();

        let mut loader = tiler.tiles_loader(image_size);
        if let Some(viewport) = viewport {
            loader = loader.with_viewport(viewport, tile_size);
        }

        Ok(loader
            .iter()
            .map(|tile| TileCopy::plan(&tiler, tile, image_size, factor, tile_size))
            .collect())
    }

    /// Plans every zoom level in `min_zoom..=max_zoom`.
    ///
    /// An inverted range gives an empty plan.
    ///
    /// # Errors
    ///
    /// [`PyramidError::ZoomTooDeep`] when `max_zoom` is past
    /// [`PyramidGenerator::deepest_zoom`]; nothing is planned then.
    pub fn plan(
        &mut self,
        min_zoom: u8,
        max_zoom: u8,
        image_size: PixelSize,
    ) -> Result<PyramidPlan, PyramidError> {
        let max_zoom = max_zoom.min(MAX_ZOOM);
        let mut plan = PyramidPlan::new(image_size, self.config.emit_blank_tiles);
        if min_zoom > max_zoom {
            warn!(min_zoom, max_zoom, "Empty zoom range, nothing to generate");
            return Ok(plan);
        }
        self.check_depth(max_zoom)?;

        for zoom in min_zoom..=max_zoom {
            let copies = self.plan_zoom(zoom, image_size)?;
            plan.push_level(zoom, copies);
        }
        Ok(plan)
    }

    /// Generates every zoom level in `min_zoom..=max_zoom`.
    ///
    /// Tiles are delivered to `sink` in loader order, one zoom level after
    /// another. A sink failure is logged and counted; generation goes on
    /// with the next tile. An inverted range produces nothing.
    ///
    /// # Errors
    ///
    /// [`PyramidError::ZoomTooDeep`] before any tile is produced.
    pub fn generate<S>(
        &mut self,
        min_zoom: u8,
        max_zoom: u8,
        source: &S,
        sink: &mut dyn TileSink,
    ) -> Result<TilesStat, PyramidError>
    where
        S: ImageSource + ?Sized,
    {
        let plan = self.plan(min_zoom, max_zoom, source.size())?;
        Ok(self.generate_plan(&plan, source, sink))
    }

    /// Generates from the viewport's minimum zoom up to `max_zoom`.
    pub fn generate_auto<S>(
        &mut self,
        max_zoom: u8,
        source: &S,
        sink: &mut dyn TileSink,
    ) -> Result<TilesStat, PyramidError>
    where
        S: ImageSource + ?Sized,
    {
        let min_zoom = self.min_zoom_for_viewport(max_zoom, source.size());
        self.generate(min_zoom, max_zoom, source, sink)
    }

    /// Renders a plan made by [`PyramidGenerator::plan`].
    pub fn generate_plan<S>(
        &mut self,
        plan: &PyramidPlan,
        source: &S,
        sink: &mut dyn TileSink,
    ) -> TilesStat
    where
        S: ImageSource + ?Sized,
    {
        let image_size = plan.image_size();
        let mut stat = TilesStat::new(self.pin_geo, self.pin_geo);

        if let Some(range) = plan.zoom_range() {
            info!(
                min_zoom = range.start(),
                max_zoom = range.end(),
                native_zoom = self.native_zoom,
                image = %image_size,
                tiles = plan.render_count(),
                "Generating tile pyramid"
            );
        }
        for (zoom, copies) in plan.levels() {
            self.generate_zoom(zoom, copies, plan, source, sink, &mut stat);
        }

        let area_zoom = stat.max_zoom().unwrap_or(self.native_zoom);
        let tiler = self.image_tiler(area_zoom);
        let top_left = tiler.geo_position(&ImagePoint::new(0, 0));
        let bottom_right = tiler.geo_position(&image_size.as_point());
        stat.set_area(top_left, bottom_right);

        info!(
            tiles = stat.tiles(),
            skipped = stat.skipped(),
            failed = stat.failed(),
            "Tile pyramid complete"
        );
        stat
    }

    fn generate_zoom<S>(
        &self,
        zoom: u8,
        copies: &[TileCopy],
        plan: &PyramidPlan,
        source: &S,
        sink: &mut dyn TileSink,
        stat: &mut TilesStat,
    ) where
        S: ImageSource + ?Sized,
    {
        let selected: Vec<&TileCopy> = copies
            .iter()
            .filter(|copy| {
                let keep = plan.renders(copy);
                if !keep {
                    debug!(tile = %copy.tile, "Tile outside image, skipped");
                    stat.record_skipped();
                }
                keep
            })
            .collect();

        info!(
            zoom,
            tiles = copies.len(),
            rendered = selected.len(),
            factor = self.scale_factor(zoom),
            "Generating zoom level"
        );

        let config = &self.config;
        let batch_size = if config.parallel { PARALLEL_BATCH_SIZE } else { 1 };
        for batch in selected.chunks(batch_size) {
            let images: Vec<_> = if config.parallel {
                batch.par_iter().map(|copy| copy.render(source, config)).collect()
            } else {
                batch.iter().map(|copy| copy.render(source, config)).collect()
            };

            for (copy, image) in batch.iter().zip(images) {
                match sink.put_tile(&copy.tile, &image, config.format) {
                    Ok(()) => {
                        debug!(tile = %copy.tile, source = %copy.source, target = %copy.target, "Tile stored");
                        stat.record_tile(zoom);
                    }
                    Err(e) => {
                        warn!(tile = %copy.tile, error = %e, "Failed to store tile");
                        stat.record_failure();
                    }
                }
            }
        }
    }
}
