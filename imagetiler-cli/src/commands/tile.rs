//! Tile command - describe the tile containing a coordinate.

use clap::Args;

use imagetiler::geo::GeoPoint;
use imagetiler::raster::TileFormat;
use imagetiler::tile::{TileCorner, TileInfo};

use super::common::{parse_geo, parse_zoom, FormatArg};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct TileArgs {
    /// Coordinate as lon,lat
    #[arg(
        value_parser = parse_geo,
        allow_hyphen_values = true,
        required_unless_present = "path"
    )]
    pub point: Option<GeoPoint>,

    /// Zoom level (number or preset name)
    #[arg(short, long, value_parser = parse_zoom, default_value = "street")]
    pub zoom: u8,

    /// Tile extension used in the printed path
    #[arg(long, value_enum, default_value = "png")]
    pub format: FormatArg,

    /// Describe a tile path such as 13/4346/2792.png instead
    #[arg(long, conflicts_with = "point")]
    pub path: Option<String>,
}

/// Run the tile command.
pub fn run(args: TileArgs) -> Result<(), CliError> {
    let (tile, extension) = match (&args.path, args.point) {
        (Some(path), _) => TileInfo::from_path(path)
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?,
        (None, Some(point)) => (
            TileInfo::from_geo(&point, args.zoom),
            TileFormat::from(args.format).extension().to_string(),
        ),
        (None, None) => {
            return Err(CliError::InvalidArgument(
                "either a coordinate or --path is required".to_string(),
            ))
        }
    };

    print!("{}", describe(&tile, &extension));
    Ok(())
}

fn describe(tile: &TileInfo, extension: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Tile:         {}\n", tile));
    out.push_str(&format!("Path:         {}\n", tile.path(extension)));
    for (name, corner) in [
        ("Top left", TileCorner::TopLeft),
        ("Top right", TileCorner::TopRight),
        ("Bottom left", TileCorner::BottomLeft),
        ("Bottom right", TileCorner::BottomRight),
    ] {
        out.push_str(&format!("{:<13} {}\n", format!("{}:", name), tile.corner(corner)));
    }
    out.push_str(&format!(
        "Size:         {:.1} m x {:.1} m\n",
        tile.width_m(),
        tile.height_m()
    ));
    out
}
