//! Pyramid generation errors.

use thiserror::Error;

/// Errors from planning or generating a tile pyramid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PyramidError {
    /// Tiles at `zoom` would cover less than one image pixel.
    #[error(
        "Zoom {zoom} is too deep for native zoom {native_zoom}: \
         tiles would cover less than one image pixel (deepest usable zoom is {deepest_zoom})"
    )]
    ZoomTooDeep {
        zoom: u8,
        native_zoom: u8,
        deepest_zoom: u8,
    },
}
