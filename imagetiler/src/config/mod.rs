//! User configuration file (`~/.imagetiler/config.ini`).
//!
//! Supplies defaults for the command line tool. Every value is optional;
//! a missing file or key falls back to the built-in default, and command
//! line arguments override whatever is configured here.
//!
//! ```ini
//! [tiles]
//! size = 256
//! format = png
//! background = auto
//!
//! [viewport]
//! width = 1024
//! height = 768
//!
//! [download]
//! base_url = https://tile.openstreetmap.org/
//! timeout = 30
//!
//! [logging]
//! level = info
//! file =
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DownloadSettings, LoggingSettings, TileSettings, ViewportSettings,
    DEFAULT_LOG_LEVEL,
};
