//! Mirrors the tiles of a [`TilesLoader`] area from a slippy-map server.
//!
//! Tiles are fetched one at a time in loader order and stored under
//! `{root}/{zoom}/{x}/{y}.{ext}`. A failed tile is logged and counted in the
//! [`DownloadReport`]; the run goes on with the next one.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::http::{HttpClient, HttpError};
use crate::loader::{LoadEvent, LoadWindow, TilesLoader};
use crate::raster::TileFormat;
use crate::tile::TileInfo;

/// Tile server used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://tile.openstreetmap.org/";

/// Errors while mirroring a single tile.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to download tile {tile}: {source}")]
    Http {
        tile: TileInfo,
        #[source]
        source: HttpError,
    },
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Tile counts of one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelReport {
    pub zoom: u8,
    /// Columns and rows requested, padding included
    pub tiles: (u32, u32),
    /// Columns and rows covering the box itself
    pub area: (u32, u32),
}

impl LevelReport {
    fn from_window(window: &LoadWindow) -> Self {
        Self {
            zoom: window.zoom(),
            tiles: (window.tiles.columns(), window.tiles.rows()),
            area: (window.area.columns(), window.area.rows()),
        }
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.0 as usize * self.tiles.1 as usize
    }

    pub fn area_count(&self) -> usize {
        self.area.0 as usize * self.area.1 as usize
    }
}

/// Outcome of a [`TileDownloader::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub levels: Vec<LevelReport>,
    pub downloaded: usize,
    pub failed: usize,
    pub bytes: u64,
}

/// Copies tiles from a tile server into `{root}/{zoom}/{x}/{y}.{ext}`.
pub struct TileDownloader<C: HttpClient> {
    client: C,
    base_url: String,
    root: PathBuf,
    format: TileFormat,
}

impl<C: HttpClient> TileDownloader<C> {
    /// Creates a downloader for the default server storing under `root`.
    pub fn new(client: C, root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            root: root.into(),
            format: TileFormat::Png,
        }
    }

    /// Sets the server base URL. A missing trailing slash is added.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// Sets the tile format requested from the server.
    pub fn with_format(mut self, format: TileFormat) -> Self {
        self.format = format;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Server URL of a tile.
    pub fn tile_url(&self, tile: &TileInfo) -> String {
        format!("{}{}", self.base_url, tile.path(self.format.extension()))
    }

    /// Local file a tile is stored in.
    pub fn tile_file(&self, tile: &TileInfo) -> PathBuf {
        self.root.join(tile.path(self.format.extension()))
    }

    /// Downloads one tile, returning the number of bytes written.
    pub fn download_tile(&self, tile: &TileInfo) -> Result<usize, DownloadError> {
        let url = self.tile_url(tile);
        let bytes = self
            .client
            .get(&url)
            .map_err(|source| DownloadError::Http { tile: *tile, source })?;

        let path = self.tile_file(tile);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| DownloadError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &bytes).map_err(|source| DownloadError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(tile = %tile, url = %url, bytes = bytes.len(), "Tile downloaded");
        Ok(bytes.len())
    }

    /// Downloads every tile of `loader`.
    pub fn run(&self, loader: &TilesLoader) -> DownloadReport {
        self.run_with_progress(loader, |_, _| {})
    }

    /// Downloads every tile of `loader`, reporting each outcome to `on_tile`.
    pub fn run_with_progress<F>(&self, loader: &TilesLoader, mut on_tile: F) -> DownloadReport
    where
        F: FnMut(&TileInfo, Result<usize, &DownloadError>),
    {
        let mut report = DownloadReport::default();

        for event in loader.events() {
            match event {
                LoadEvent::Begin(window) => {
                    let level = LevelReport::from_window(&window);
                    info!(
                        zoom = level.zoom,
                        tiles = level.tile_count(),
                        columns = level.tiles.0,
                        rows = level.tiles.1,
                        "Downloading zoom level"
                    );
                    info!(
                        zoom = level.zoom,
                        tiles = level.area_count(),
                        columns = level.area.0,
                        rows = level.area.1,
                        "Real area"
                    );
                    report.levels.push(level);
                }
                LoadEvent::Tile(tile) => match self.download_tile(&tile) {
                    Ok(bytes) => {
                        report.downloaded += 1;
                        report.bytes += bytes as u64;
                        on_tile(&tile, Ok(bytes));
                    }
                    Err(e) => {
                        warn!(tile = %tile, error = %e, "Tile download failed");
                        report.failed += 1;
                        on_tile(&tile, Err(&e));
                    }
                },
                LoadEvent::End(window) => {
                    debug!(zoom = window.zoom(), "Zoom level done");
                }
            }
        }

        info!(
            downloaded = report.downloaded,
            failed = report.failed,
            bytes = report.bytes,
            "Download complete"
        );
        report
    }
}
