//! Tile pyramid generation.
//!
//! ```text
//!   RasterImage ──► PyramidGenerator ──► TileCopy (per tile) ──► TileSink
//!                        │                    │
//!                   ImageTiler (per zoom)   background + clipped,
//!                   TilesLoader             resampled image rect
//! ```
//!
//! A run is planned first ([`PyramidPlan`]), then rendered. The generator
//! returns a [`TilesStat`] describing the produced zoom range and the
//! geographic footprint of the image. Zoom levels whose tiles would cover
//! less than one image pixel are rejected with [`PyramidError`].

mod config;
mod copy;
mod error;
mod generator;
mod plan;
mod stat;

pub use config::{PyramidConfig, PARALLEL_BATCH_SIZE};
pub use copy::TileCopy;
pub use error::PyramidError;
pub use generator::PyramidGenerator;
pub use plan::PyramidPlan;
pub use stat::TilesStat;
