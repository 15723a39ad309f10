//! Download command - mirror the tiles of a bounding box.

use std::path::PathBuf;

use clap::Args;

use imagetiler::config::ConfigFile;
use imagetiler::download::{ReqwestClient, TileDownloader};
use imagetiler::geo::GeoPoint;
use imagetiler::loader::TilesLoader;
use imagetiler::raster::{PixelSize, TileFormat};

use super::common::{ensure_dir, parse_geo, parse_size, parse_zoom, tile_progress, FormatArg};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// One corner of the box, as lon,lat
    #[arg(long, value_parser = parse_geo, allow_hyphen_values = true)]
    pub from: GeoPoint,

    /// The opposite corner, as lon,lat
    #[arg(long, value_parser = parse_geo, allow_hyphen_values = true)]
    pub to: GeoPoint,

    /// Lowest zoom level (number or preset name)
    #[arg(long, value_parser = parse_zoom, default_value = "city")]
    pub min_zoom: u8,

    /// Highest zoom level (number or preset name)
    #[arg(long, value_parser = parse_zoom, default_value = "street")]
    pub max_zoom: u8,

    /// Minimum area every zoom level must cover, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<PixelSize>,

    /// Output directory
    #[arg(short, long, default_value = "tiles")]
    pub output: PathBuf,

    /// Tile server base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Tile extension requested from the server
    #[arg(long, value_enum, default_value = "png")]
    pub format: FormatArg,
}

/// Run the download command.
pub fn run(args: DownloadArgs, config: &ConfigFile) -> Result<(), CliError> {
    let timeout = args.timeout.unwrap_or(config.download.timeout);
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| config.download.base_url.clone());

    let mut loader = TilesLoader::new(args.from, args.to, args.min_zoom, args.max_zoom);
    if let Some(viewport) = args.viewport.or(config.viewport.size()) {
        loader = loader.with_viewport(viewport, config.tiles.size);
    }

    ensure_dir(&args.output)?;
    let client = ReqwestClient::with_timeout(timeout)?;
    let downloader = TileDownloader::new(client, &args.output)
        .with_base_url(&base_url)
        .with_format(TileFormat::from(args.format));

    println!("Downloading from {}", downloader.base_url());
    let bar = tile_progress(loader.tile_count() as u64);
    let report = downloader.run_with_progress(&loader, |tile, result| {
        bar.inc(1);
        match result {
            Ok(_) => bar.set_message(tile.to_string()),
            Err(e) => bar.println(format!("  {}", e)),
        }
    });
    bar.finish_and_clear();

    for level in &report.levels {
        println!(
            "Zoom {:>2}: {} ({} x {}) tiles, real area {} ({} x {}) tiles",
            level.zoom,
            level.tile_count(),
            level.tiles.0,
            level.tiles.1,
            level.area_count(),
            level.area.0,
            level.area.1
        );
    }
    println!(
        "Downloaded {} tiles ({} bytes) to {}",
        report.downloaded,
        report.bytes,
        args.output.display()
    );

    if report.failed > 0 {
        return Err(CliError::Incomplete {
            failed: report.failed,
        });
    }
    Ok(())
}
