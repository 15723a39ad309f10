//! Planned tile copies of one generation run.

use std::ops::RangeInclusive;

use super::TileCopy;
use crate::raster::PixelSize;

/// Every tile copy of a run, zoom level by zoom level, lowest zoom first.
///
/// Made by [`super::PyramidGenerator::plan`] for the generator's settings at
/// that time. Changing the generator afterwards leaves the plan stale.
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidPlan {
    image_size: PixelSize,
    emit_blank_tiles: bool,
    levels: Vec<(u8, Vec<TileCopy>)>,
}

impl PyramidPlan {
    pub(crate) fn new(image_size: PixelSize, emit_blank_tiles: bool) -> Self {
        Self {
            image_size,
            emit_blank_tiles,
            levels: Vec::new(),
        }
    }

    pub(crate) fn push_level(&mut self, zoom: u8, copies: Vec<TileCopy>) {
        self.levels.push((zoom, copies));
    }

    pub fn image_size(&self) -> PixelSize {
        self.image_size
    }

    /// Whether tiles without any image pixel are delivered too.
    pub fn emit_blank_tiles(&self) -> bool {
        self.emit_blank_tiles
    }

    /// Planned zoom levels; `None` for an empty plan.
    pub fn zoom_range(&self) -> Option<RangeInclusive<u8>> {
        let first = self.levels.first()?.0;
        let last = self.levels.last()?.0;
        Some(first..=last)
    }

    /// Copies of each zoom level in loader order.
    pub fn levels(&self) -> impl Iterator<Item = (u8, &[TileCopy])> + '_ {
        self.levels
            .iter()
            .map(|(zoom, copies)| (*zoom, copies.as_slice()))
    }

    /// All planned tiles, blank ones included.
    pub fn tile_count(&self) -> usize {
        self.levels.iter().map(|(_, copies)| copies.len()).sum()
    }

    /// Tiles that will be handed to the sink.
    pub fn render_count(&self) -> usize {
        self.levels
            .iter()
            .flat_map(|(_, copies)| copies.iter())
            .filter(|copy| self.renders(copy))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub(crate) fn renders(&self, copy: &TileCopy) -> bool {
        self.emit_blank_tiles || !copy.is_blank()
    }
}
