//! Mirroring tiles from a slippy-map tile server.
//!
//! [`TileDownloader`] walks the windows of a [`crate::loader::TilesLoader`]
//! and copies every tile from `{base_url}{zoom}/{x}/{y}.png` into a local
//! directory with the same layout. A failed tile is logged and counted; the
//! walk continues.

mod downloader;
pub mod http;

pub use downloader::{DownloadError, DownloadReport, LevelReport, TileDownloader, DEFAULT_BASE_URL};
pub use http::{HttpClient, HttpError, ReqwestClient};
