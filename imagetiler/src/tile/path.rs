//! Tile path parsing.
//!
//! Parses paths in the slippy-map layout `{zoom}/{x}/{y}.{ext}`, the inverse
//! of [`TileInfo::path`]. A leading directory prefix is ignored, so both
//! `13/4346/2792.png` and `tiles/13/4346/2792.png` are accepted.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use super::TileInfo;
use crate::coord::{tiles_per_side, MAX_ZOOM};

/// Error parsing a tile path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TilePathError {
    /// Path doesn't match `{zoom}/{x}/{y}.{ext}`
    #[error("Path doesn't match the {{zoom}}/{{x}}/{{y}}.{{ext}} pattern: {0}")]
    InvalidPattern(String),
    /// Zoom level is not a number or exceeds the maximum
    #[error("Invalid zoom level: {0}")]
    InvalidZoom(String),
    /// Index is not a number or lies outside the grid at this zoom
    #[error("Tile index {index} out of range at zoom {zoom}")]
    IndexOutOfRange { index: String, zoom: u8 },
}

/// Pattern: `<zoom>/<x>/<y>.<ext>`, anchored at the end of the path.
fn tile_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|/)(\d+)/(\d+)/(\d+)\.([A-Za-z0-9]+)$")
            .expect("tile path pattern is valid")
    })
}

impl TileInfo {
    /// Parses a `{zoom}/{x}/{y}.{ext}` path into the tile and its extension.
    ///
    /// # Example
    ///
    /// ```
    /// use imagetiler::tile::TileInfo;
    ///
    /// let (tile, ext) = TileInfo::from_path("13/4346/2792.png").unwrap();
    /// assert_eq!(tile, TileInfo::new(4346, 2792, 13));
    /// assert_eq!(ext, "png");
    /// ```
    pub fn from_path(path: &str) -> Result<(TileInfo, String), TilePathError> {
        let normalized = path.replace('\\', "/");
        let captures = tile_path_pattern()
            .captures(&normalized)
            .ok_or_else(|| TilePathError::InvalidPattern(path.to_string()))?;

        let zoom_str = &captures[1];
        let zoom = zoom_str
            .parse::<u8>()
            .ok()
            .filter(|z| *z <= MAX_ZOOM)
            .ok_or_else(|| TilePathError::InvalidZoom(zoom_str.to_string()))?;

        let n = tiles_per_side(zoom);
        let parse_index = |s: &str| {
            s.parse::<u32>()
                .ok()
                .filter(|i| *i < n)
                .ok_or_else(|| TilePathError::IndexOutOfRange {
                    index: s.to_string(),
                    zoom,
                })
        };
        let x = parse_index(&captures[2])?;
        let y = parse_index(&captures[3])?;

        Ok((TileInfo::new(x, y, zoom), captures[4].to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let (tile, ext) = TileInfo::from_path("14/8695/5587.jpg").unwrap();
        assert_eq!(tile, TileInfo::new(8695, 5587, 14));
        assert_eq!(ext, "jpg");
    }

    #[test]
    fn test_parse_with_prefix() {
        let (tile, _) = TileInfo::from_path("/var/tiles/13/4346/2792.png").unwrap();
        assert_eq!(tile, TileInfo::new(4346, 2792, 13));

        let (tile, _) = TileInfo::from_path(r"out\13\4346\2792.png").unwrap();
        assert_eq!(tile, TileInfo::new(4346, 2792, 13));
    }

    #[test]
    fn test_roundtrip_with_path() {
        let tile = TileInfo::new(123, 456, 11);
        let (parsed, ext) = TileInfo::from_path(&tile.path("png")).unwrap();
        assert_eq!(parsed, tile);
        assert_eq!(ext, "png");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            TileInfo::from_path("13/4346.png"),
            Err(TilePathError::InvalidPattern(_))
        ));
        assert!(matches!(
            TileInfo::from_path("13/4346/2792"),
            Err(TilePathError::InvalidPattern(_))
        ));
        assert!(matches!(
            TileInfo::from_path("a13/4346/2792.png"),
            Err(TilePathError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_invalid_zoom() {
        assert_eq!(
            TileInfo::from_path("31/0/0.png"),
            Err(TilePathError::InvalidZoom("31".to_string()))
        );
        assert!(matches!(
            TileInfo::from_path("300/0/0.png"),
            Err(TilePathError::InvalidZoom(_))
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = TileInfo::from_path("2/4/0.png").unwrap_err();
        assert_eq!(
            err,
            TilePathError::IndexOutOfRange {
                index: "4".to_string(),
                zoom: 2
            }
        );
        assert_eq!(err.to_string(), "Tile index 4 out of range at zoom 2");
    }
}
