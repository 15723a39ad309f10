//! Tile sink writing encoded tiles to a directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::trace;

use super::{SinkError, TileSink};
use crate::raster::{encode_tile, TileFormat};
use crate::tile::TileInfo;

/// Writes tiles to `{root}/{zoom}/{x}/{y}.{ext}`, creating directories.
///
/// Existing tiles are overwritten.
#[derive(Debug, Clone)]
pub struct FileTileWriter {
    root: PathBuf,
    written: usize,
}

impl FileTileWriter {
    /// Creates a writer rooted at `root`.
    ///
    /// The directory is created lazily with the first tile.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    /// Root directory of the pyramid.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a tile is written to.
    pub fn tile_path(&self, tile: &TileInfo, format: TileFormat) -> PathBuf {
        self.root.join(tile.path(format.extension()))
    }

    /// Number of tiles written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl TileSink for FileTileWriter {
    fn put_tile(
        &mut self,
        tile: &TileInfo,
        image: &RgbaImage,
        format: TileFormat,
    ) -> Result<(), SinkError> {
        let path = self.tile_path(tile, format);
        let bytes = encode_tile(image, format)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SinkError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &bytes).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        self.written += 1;
        trace!(tile = %tile, path = %path.display(), bytes = bytes.len(), "Tile written");
        Ok(())
    }
}
