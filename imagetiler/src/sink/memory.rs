//! In-memory tile sink.

use image::RgbaImage;

use super::{SinkError, TileSink};
use crate::raster::{encode_tile, TileFormat};
use crate::tile::TileInfo;

/// One encoded tile kept by a [`MemoryTileSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTile {
    pub tile: TileInfo,
    pub format: TileFormat,
    pub bytes: Vec<u8>,
}

/// Keeps every received tile, encoded, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct MemoryTileSink {
    tiles: Vec<StoredTile>,
}

impl MemoryTileSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles in the order they were delivered.
    pub fn tiles(&self) -> &[StoredTile] {
        &self.tiles
    }

    /// Looks a tile up by identity.
    pub fn get(&self, tile: &TileInfo) -> Option<&StoredTile> {
        self.tiles.iter().find(|stored| stored.tile == *tile)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Consumes the sink, returning the stored tiles.
    pub fn into_tiles(self) -> Vec<StoredTile> {
        self.tiles
    }
}

impl TileSink for MemoryTileSink {
    fn put_tile(
        &mut self,
        tile: &TileInfo,
        image: &RgbaImage,
        format: TileFormat,
    ) -> Result<(), SinkError> {
        let bytes = encode_tile(image, format)?;
        self.tiles.push(StoredTile {
            tile: *tile,
            format,
            bytes,
        });
        Ok(())
    }
}
