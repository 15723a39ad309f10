//! Argument parsers and helpers shared across CLI commands.

use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use imagetiler::coord::MAX_ZOOM;
use imagetiler::geo::GeoPoint;
use imagetiler::raster::{Background, ImagePoint, PixelSize, TileFormat};
use imagetiler::zoom::ZoomLevel;

use crate::error::CliError;

/// Tile encoding selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// PNG, keeps transparency
    Png,
    /// JPEG, smaller, no transparency
    Jpg,
}

impl From<FormatArg> for TileFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Png => TileFormat::Png,
            FormatArg::Jpg => TileFormat::Jpg,
        }
    }
}

/// Parses `lon,lat`.
pub fn parse_geo(value: &str) -> Result<GeoPoint, String> {
    GeoPoint::parse_pair(value)
        .ok_or_else(|| format!("expected 'lon,lat' in decimal degrees, got '{}'", value))
}

/// Parses `x,y` image pixel coordinates.
pub fn parse_pixel(value: &str) -> Result<ImagePoint, String> {
    let parse = || -> Option<ImagePoint> {
        let (x, y) = value.split_once(',')?;
        Some(ImagePoint::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
    };
    parse().ok_or_else(|| format!("expected 'x,y' in pixels, got '{}'", value))
}

/// Parses `WIDTHxHEIGHT`.
pub fn parse_size(value: &str) -> Result<PixelSize, String> {
    PixelSize::parse(value).ok_or_else(|| format!("expected 'WIDTHxHEIGHT', got '{}'", value))
}

/// Parses a zoom level given as a number or a preset name.
pub fn parse_zoom(value: &str) -> Result<u8, String> {
    if let Ok(level) = value.trim().parse::<i64>() {
        if !(0..=MAX_ZOOM as i64).contains(&level) {
            return Err(format!("zoom level must be between 0 and {}", MAX_ZOOM));
        }
        return Ok(level as u8);
    }
    value.parse::<ZoomLevel>().map(|preset| preset.level())
}

/// Parses a background colour (`auto` or hex).
pub fn parse_background(value: &str) -> Result<Background, String> {
    Background::parse(value)
        .ok_or_else(|| format!("expected 'auto' or a hex colour like '#ffffff', got '{}'", value))
}

/// Creates `path` and its parents.
pub fn ensure_dir(path: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(path).map_err(|error| CliError::OutputDir {
        path: path.to_path_buf(),
        error,
    })
}

/// Progress bar for `total` tiles.
pub fn tile_progress(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    bar.enable_steady_tick(Duration::from_millis(200));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geo() {
        let point = parse_geo("2.33535,48.86709").unwrap();
        assert_eq!(point.lon(), 2.33535);
        assert_eq!(point.lat(), 48.86709);
        assert!(parse_geo("48.8").is_err());
    }

    #[test]
    fn test_parse_pixel() {
        assert_eq!(parse_pixel("523, 645").unwrap(), ImagePoint::new(523, 645));
        assert_eq!(parse_pixel("-3,4").unwrap(), ImagePoint::new(-3, 4));
        assert!(parse_pixel("523").is_err());
        assert!(parse_pixel("a,b").is_err());
    }

    #[test]
    fn test_parse_zoom() {
        assert_eq!(parse_zoom("14"), Ok(14));
        assert_eq!(parse_zoom("city"), Ok(13));
        assert_eq!(parse_zoom("Building"), Ok(17));
        assert!(parse_zoom("31").is_err());
        assert!(parse_zoom("-1").is_err());
        assert!(parse_zoom("galaxy").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1024x768"), Ok(PixelSize::new(1024, 768)));
        assert!(parse_size("1024").is_err());
    }

    #[test]
    fn test_format_arg() {
        assert_eq!(TileFormat::from(FormatArg::Jpg), TileFormat::Jpg);
    }
}
