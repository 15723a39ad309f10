//! Tile sinks - where finished tiles go.
//!
//! The pyramid generator hands every rendered tile to a [`TileSink`]. A sink
//! failure is reported back to the generator, which logs it and continues
//! with the next tile.
//!
//! Provided sinks:
//!
//! - [`FileTileWriter`]: encodes tiles to `{root}/{zoom}/{x}/{y}.{ext}`
//! - [`MemoryTileSink`]: keeps encoded tiles in memory
//! - any `FnMut(&TileInfo, &RgbaImage, TileFormat) -> Result<(), SinkError>`

mod file;
mod memory;

pub use file::FileTileWriter;
pub use memory::{MemoryTileSink, StoredTile};

use std::path::PathBuf;

use image::RgbaImage;
use thiserror::Error;

use crate::raster::{RasterError, TileFormat};
use crate::tile::TileInfo;

/// Errors raised while storing a tile.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The tile could not be encoded.
    #[error(transparent)]
    Encode(#[from] RasterError),
    /// Writing the tile file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The sink refused the tile.
    #[error("Tile {tile} rejected: {reason}")]
    Rejected { tile: TileInfo, reason: String },
}

/// Receives finished tiles, one call per tile, never concurrently.
///
/// The image buffer is only borrowed for the duration of the call.
pub trait TileSink {
    /// Stores one tile.
    fn put_tile(
        &mut self,
        tile: &TileInfo,
        image: &RgbaImage,
        format: TileFormat,
    ) -> Result<(), SinkError>;
}

impl<F> TileSink for F
where
    F: FnMut(&TileInfo, &RgbaImage, TileFormat) -> Result<(), SinkError>,
{
    fn put_tile(
        &mut self,
        tile: &TileInfo,
        image: &RgbaImage,
        format: TileFormat,
    ) -> Result<(), SinkError> {
        self(tile, image, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |tile: &TileInfo, image: &RgbaImage, format: TileFormat| {
                seen.push((*tile, image.width(), format));
                Ok::<(), SinkError>(())
            };
            let image = RgbaImage::new(4, 4);
            sink.put_tile(&TileInfo::new(1, 2, 3), &image, TileFormat::Png)
                .unwrap();
        }
        assert_eq!(seen, vec![(TileInfo::new(1, 2, 3), 4, TileFormat::Png)]);
    }

    #[test]
    fn test_rejected_display() {
        let err = SinkError::Rejected {
            tile: TileInfo::new(1, 2, 3),
            reason: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "Tile 3/1/2 rejected: quota");
    }
}
