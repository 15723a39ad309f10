//! Slippy-map tile types.
//!
//! [`TileInfo`] identifies one tile by `(x, y, zoom)` and derives its corner
//! coordinates, neighbours and containment. [`TileWindow`] is an inclusive
//! rectangle of tiles at one zoom level, iterated column by column.

mod info;
mod path;
mod window;

pub use info::{TileCorner, TileInfo};
pub use path::TilePathError;
pub use window::{TileWindow, TileWindowIter};
