//! JSON summary of a generated pyramid.
//!
//! Written next to the tiles as `metadata.json` so a map viewer can set its
//! bounds and zoom range without scanning the directory:
//!
//! ```json
//! {
//!   "minZoom": 14,
//!   "maxZoom": 17,
//!   "area": [[48.8714, 2.3284], [48.8627, 2.3421]],
//!   "id": "paris",
//!   "title": "Paris",
//!   "url": "{z}/{x}/{y}.png",
//!   "width": 2048,
//!   "height": 1536,
//!   "format": "png"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pyramid::TilesStat;
use crate::raster::{PixelSize, TileFormat};

/// File name used by [`PyramidMetadata::write_to_dir`].
pub const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pyramid summary in the layout viewers expect.
///
/// `area` holds the north-west and south-east corners as `[lat, lon]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidMetadata {
    pub min_zoom: Option<u8>,
    pub max_zoom: Option<u8>,
    pub area: [[f64; 2]; 2],
    pub id: String,
    pub title: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub format: TileFormat,
}

impl PyramidMetadata {
    /// Builds the summary of a finished run.
    ///
    /// `id` doubles as the title until [`Self::with_title`] is called.
    pub fn from_stat(id: &str, stat: &TilesStat, image_size: PixelSize, format: TileFormat) -> Self {
        let top_left = stat.top_left();
        let bottom_right = stat.bottom_right();
        Self {
            min_zoom: stat.min_zoom(),
            max_zoom: stat.max_zoom(),
            area: [
                [top_left.lat(), top_left.lon()],
                [bottom_right.lat(), bottom_right.lon()],
            ],
            id: id.to_string(),
            title: id.to_string(),
            url: format!("{{z}}/{{x}}/{{y}}.{}", format.extension()),
            width: image_size.width,
            height: image_size.height,
            format,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Prefixes the tile URL template, e.g. with the public tile root.
    pub fn with_url_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        if !prefix.is_empty() {
            self.url = format!("{}/{}", prefix, self.url);
        }
        self
    }

    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes `metadata.json` into `dir`, returning the file path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, MetadataError> {
        let path = dir.join(METADATA_FILE);
        let json = self.to_json()?;
        fs::create_dir_all(dir).map_err(|source| MetadataError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| MetadataError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
