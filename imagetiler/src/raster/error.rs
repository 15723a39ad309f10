//! Error types for image loading and tile encoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the source image or encoding tiles.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The source image could not be opened or decoded.
    #[error("Failed to read image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// A tile could not be encoded.
    #[error("Failed to encode tile as {format}: {source}")]
    Encode {
        format: super::TileFormat,
        #[source]
        source: image::ImageError,
    },
    /// The image has no pixels.
    #[error("Image has invalid dimensions {width}×{height}")]
    EmptyImage { width: u32, height: u32 },
}
