//! ImageTiler - cut a geo-pinned raster image into slippy-map tiles
//!
//! An image (a scanned map, a drone shot, a floor plan) is tied to the
//! world by a single pin: one pixel paired with its longitude and latitude,
//! plus the zoom level at which one image pixel equals one tile pixel. From
//! that the library derives where every pixel lies, which Web-Mercator
//! tiles the image touches at each zoom level, and renders those tiles.
//!
//! ```text
//!   geo, coord ──► tile ──► tiler ──► loader ──► pyramid ──► sink
//!   (spherical   (TileInfo) (pixel ↔   (tile      (render)   (files,
//!    + mercator)            geo)       windows)              memory)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use imagetiler::geo::GeoPoint;
//! use imagetiler::pyramid::PyramidGenerator;
//! use imagetiler::raster::{ImagePoint, RasterImage};
//! use imagetiler::sink::FileTileWriter;
//!
//! let image = RasterImage::open("plan.png")?;
//! let mut generator = PyramidGenerator::new(
//!     GeoPoint::new(2.33535, 48.86709),
//!     ImagePoint::new(523, 645),
//!     17,
//! );
//! let mut writer = FileTileWriter::new("tiles");
//! let stat = generator.generate(14, 18, &image, &mut writer)?;
//! println!("{}", stat);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod coord;
pub mod download;
pub mod geo;
pub mod loader;
pub mod logging;
pub mod metadata;
pub mod pyramid;
pub mod raster;
pub mod sink;
pub mod tile;
pub mod tiler;
pub mod zoom;
