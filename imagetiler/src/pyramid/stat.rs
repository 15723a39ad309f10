//! Summary of one pyramid generation run.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::geo::GeoPoint;

/// What a [`super::PyramidGenerator::generate`] run produced.
///
/// Zoom bounds cover only levels where at least one tile was stored. The
/// area is the geographic footprint of the whole image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TilesStat {
    min_zoom: Option<u8>,
    max_zoom: Option<u8>,
    top_left: GeoPoint,
    bottom_right: GeoPoint,
    tiles: usize,
    skipped: usize,
    failed: usize,
}

impl TilesStat {
    /// Stat with no produced tiles over the given area.
    pub fn new(top_left: GeoPoint, bottom_right: GeoPoint) -> Self {
        Self {
            min_zoom: None,
            max_zoom: None,
            top_left,
            bottom_right,
            tiles: 0,
            skipped: 0,
            failed: 0,
        }
    }

    /// Lowest zoom level with at least one stored tile.
    pub fn min_zoom(&self) -> Option<u8> {
        self.min_zoom
    }

    /// Highest zoom level with at least one stored tile.
    pub fn max_zoom(&self) -> Option<u8> {
        self.max_zoom
    }

    pub fn zoom_range(&self) -> Option<RangeInclusive<u8>> {
        Some(self.min_zoom?..=self.max_zoom?)
    }

    /// Geographic position of the image's top-left pixel.
    pub fn top_left(&self) -> GeoPoint {
        self.top_left
    }

    /// Geographic position of the image's bottom-right corner.
    pub fn bottom_right(&self) -> GeoPoint {
        self.bottom_right
    }

    /// Tiles stored by the sink.
    pub fn tiles(&self) -> usize {
        self.tiles
    }

    /// Tiles not rendered because no image pixel lands on them.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Tiles the sink failed to store.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns `true` if no tile was stored.
    pub fn is_empty(&self) -> bool {
        self.tiles == 0
    }

    pub(crate) fn record_tile(&mut self, zoom: u8) {
        self.tiles += 1;
        self.min_zoom = Some(self.min_zoom.map_or(zoom, |z| z.min(zoom)));
        self.max_zoom = Some(self.max_zoom.map_or(zoom, |z| z.max(zoom)));
    }

    pub(crate) fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub(crate) fn set_area(&mut self, top_left: GeoPoint, bottom_right: GeoPoint) {
        self.top_left = top_left;
        self.bottom_right = bottom_right;
    }
}

impl fmt::Display for TilesStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.zoom_range() {
            Some(range) => write!(
                f,
                "{} tiles, zoom {}-{}",
                self.tiles,
                range.start(),
                range.end()
            )?,
            None => write!(f, "no tiles")?,
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        write!(f, ", area {} .. {}", self.top_left, self.bottom_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> (GeoPoint, GeoPoint) {
        (GeoPoint::new(2.0, 49.0), GeoPoint::new(3.0, 48.0))
    }

    #[test]
    fn test_empty_stat() {
        let (tl, br) = area();
        let stat = TilesStat::new(tl, br);
        assert!(stat.is_empty());
        assert_eq!(stat.zoom_range(), None);
        assert_eq!(stat.to_string(), format!("no tiles, area {} .. {}", tl, br));
    }

    #[test]
    fn test_records_zoom_bounds() {
        let (tl, br) = area();
        let mut stat = TilesStat::new(tl, br);
        stat.record_tile(14);
        stat.record_tile(12);
        stat.record_tile(13);
        stat.record_failure();
        stat.record_skipped();

        assert_eq!(stat.min_zoom(), Some(12));
        assert_eq!(stat.max_zoom(), Some(14));
        assert_eq!(stat.zoom_range(), Some(12..=14));
        assert_eq!(stat.tiles(), 3);
        assert_eq!(stat.failed(), 1);
        assert_eq!(stat.skipped(), 1);
        assert!(stat.to_string().starts_with("3 tiles, zoom 12-14, 1 failed"));
    }
}
