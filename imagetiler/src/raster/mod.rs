//! Image-space types and the image collaborator.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  PixelRect → PixelRect  ┌───────────────┐
//! │ pyramid plan │ ──────────────────────► │  ImageSource  │
//! └──────────────┘                         │ (RasterImage) │
//!                                          └───────┬───────┘
//!                                                  │ RgbaImage tile
//!                                                  ▼
//!                                          encode_tile(TileFormat)
//! ```
//!
//! The projection code works purely in [`ImagePoint`] and [`PixelRect`];
//! pixel mechanics live behind the [`ImageSource`] trait.

mod error;
mod format;
mod point;
mod rect;
mod source;

pub use error::RasterError;
pub use format::{Background, TileFormat};
pub use point::ImagePoint;
pub use rect::{PixelRect, PixelSize};
pub use source::{encode_tile, new_canvas, ImageSource, RasterImage};
