//! Rectangular windows of tiles at one zoom level.

use super::TileInfo;

/// An inclusive rectangle of tiles at a single zoom level.
///
/// Iteration is column-major: the outer loop walks `x` ascending and the
/// inner loop walks `y` ascending, so every tile is visited exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileWindow {
    first: TileInfo,
    last: TileInfo,
}

impl TileWindow {
    /// Creates the window spanned by two tiles.
    ///
    /// The corners are normalised so `first` is the north-west and `last`
    /// the south-east tile. Both take the zoom level of `a`.
    pub fn new(a: TileInfo, b: TileInfo) -> Self {
        let zoom = a.zoom();
        Self {
            first: TileInfo::new(a.x().min(b.x()), a.y().min(b.y()), zoom),
            last: TileInfo::new(a.x().max(b.x()), a.y().max(b.y()), zoom),
        }
    }

    /// Zoom level of every tile in the window.
    pub fn zoom(&self) -> u8 {
        self.first.zoom()
    }

    /// North-west tile.
    pub fn first(&self) -> TileInfo {
        self.first
    }

    /// South-east tile.
    pub fn last(&self) -> TileInfo {
        self.last
    }

    /// Number of columns.
    pub fn columns(&self) -> u32 {
        self.last.x() - self.first.x() + 1
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.last.y() - self.first.y() + 1
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Always `false`; a window holds at least one tile.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `tile` is inside the window.
    pub fn contains(&self, tile: &TileInfo) -> bool {
        tile.zoom() == self.zoom()
            && (self.first.x()..=self.last.x()).contains(&tile.x())
            && (self.first.y()..=self.last.y()).contains(&tile.y())
    }

    /// Iterates the tiles column by column.
    pub fn iter(&self) -> TileWindowIter {
        TileWindowIter {
            window: *self,
            x: self.first.x(),
            y: self.first.y(),
            done: false,
        }
    }
}

impl IntoIterator for &TileWindow {
    type Item = TileInfo;
    type IntoIter = TileWindowIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the tiles of a [`TileWindow`].
#[derive(Debug, Clone)]
pub struct TileWindowIter {
    window: TileWindow,
    x: u32,
    y: u32,
    done: bool,
}

impl Iterator for TileWindowIter {
    type Item = TileInfo;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let tile = TileInfo::new(self.x, self.y, self.window.zoom());

        if self.y < self.window.last.y() {
            self.y += 1;
        } else if self.x < self.window.last.x() {
            self.x += 1;
            self.y = self.window.first.y();
        } else {
            self.done = true;
        }

        Some(tile)
    }
}
