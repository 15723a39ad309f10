//! Settings structs, one per `[section]` of the INI file.

use std::path::PathBuf;

use crate::coord::DEFAULT_TILE_SIZE;
use crate::download::{http::DEFAULT_TIMEOUT_SECS, DEFAULT_BASE_URL};
use crate::raster::{Background, PixelSize, TileFormat};

/// Log filter used when neither the file nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub tiles: TileSettings,
    pub viewport: ViewportSettings,
    pub download: DownloadSettings,
    pub logging: LoggingSettings,
}

/// `[tiles]`
#[derive(Debug, Clone, PartialEq)]
pub struct TileSettings {
    pub size: u32,
    pub format: TileFormat,
    pub background: Background,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_TILE_SIZE,
            format: TileFormat::default(),
            background: Background::default(),
        }
    }
}

/// `[viewport]`; zero on either side means no viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportSettings {
    pub width: u32,
    pub height: u32,
}

impl ViewportSettings {
    pub fn size(&self) -> Option<PixelSize> {
        let size = PixelSize::new(self.width, self.height);
        (!size.is_empty()).then_some(size)
    }
}

/// `[download]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `imagetiler=debug`
    pub level: String,
    /// Log file written in addition to stderr
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}
