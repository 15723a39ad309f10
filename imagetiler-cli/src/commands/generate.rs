//! Generate command - cut an image into a tile pyramid.

use std::path::PathBuf;

use clap::Args;
use image::RgbaImage;
use indicatif::ProgressBar;
use tracing::info;

use imagetiler::config::ConfigFile;
use imagetiler::geo::GeoPoint;
use imagetiler::metadata::PyramidMetadata;
use imagetiler::pyramid::{PyramidConfig, PyramidGenerator};
use imagetiler::raster::{Background, ImagePoint, ImageSource, PixelSize, RasterImage, TileFormat};
use imagetiler::sink::{FileTileWriter, SinkError, TileSink};
use imagetiler::tile::TileInfo;

use super::common::{
    ensure_dir, parse_background, parse_geo, parse_pixel, parse_size, parse_zoom, tile_progress,
    FormatArg,
};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Source image
    pub image: PathBuf,

    /// Image pixel of the pin, as x,y
    #[arg(long, value_parser = parse_pixel, allow_hyphen_values = true)]
    pub pin_pixel: ImagePoint,

    /// Geographic position of the pin, as lon,lat
    #[arg(long, value_parser = parse_geo, allow_hyphen_values = true)]
    pub pin_geo: GeoPoint,

    /// Zoom level at which one image pixel is one tile pixel (number or preset name)
    #[arg(long, value_parser = parse_zoom)]
    pub native_zoom: u8,

    /// Lowest zoom to generate (default: lowest zoom still covering the viewport)
    #[arg(long, value_parser = parse_zoom)]
    pub min_zoom: Option<u8>,

    /// Highest zoom to generate (default: native zoom)
    #[arg(long, value_parser = parse_zoom)]
    pub max_zoom: Option<u8>,

    /// Output directory
    #[arg(short, long, default_value = "tiles")]
    pub output: PathBuf,

    /// Tile edge in pixels
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Tile encoding
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Fill outside the image: 'auto' or a hex colour
    #[arg(long, value_parser = parse_background)]
    pub background: Option<Background>,

    /// Minimum area every zoom level must cover, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<PixelSize>,

    /// Also write padding tiles lying entirely outside the image
    #[arg(long)]
    pub blank_tiles: bool,

    /// Render tiles on all CPU cores
    #[arg(long)]
    pub parallel: bool,

    /// Pyramid identifier for metadata.json (default: image file name)
    #[arg(long)]
    pub id: Option<String>,

    /// Human readable title for metadata.json
    #[arg(long)]
    pub title: Option<String>,

    /// Prefix for the tile URL template in metadata.json
    #[arg(long)]
    pub url_prefix: Option<String>,

    /// Do not write metadata.json
    #[arg(long)]
    pub no_metadata: bool,
}

impl GenerateArgs {
    /// Pyramid settings: arguments first, then the config file.
    fn pyramid_config(&self, config: &ConfigFile) -> PyramidConfig {
        let format = self
            .format
            .map(TileFormat::from)
            .unwrap_or(config.tiles.format);
        let mut pyramid = PyramidConfig::default()
            .with_tile_size(self.tile_size.unwrap_or(config.tiles.size))
            .with_format(format)
            .with_background(self.background.unwrap_or(config.tiles.background))
            .with_blank_tiles(self.blank_tiles)
            .with_parallel(self.parallel);
        if let Some(viewport) = self.viewport.or(config.viewport.size()) {
            pyramid = pyramid.with_viewport(viewport);
        }
        pyramid
    }

    fn pyramid_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| {
            self.image
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "tiles".to_string())
        })
    }
}

/// Forwards tiles to the file writer and advances the progress bar.
struct ProgressSink<'a> {
    writer: &'a mut FileTileWriter,
    bar: &'a ProgressBar,
}

impl TileSink for ProgressSink<'_> {
    fn put_tile(
        &mut self,
        tile: &TileInfo,
        image: &RgbaImage,
        format: TileFormat,
    ) -> Result<(), SinkError> {
        let result = self.writer.put_tile(tile, image, format);
        self.bar.inc(1);
        if result.is_ok() {
            self.bar.set_message(tile.to_string());
        }
        result
    }
}

/// Run the generate command.
pub fn run(args: GenerateArgs, config: &ConfigFile) -> Result<(), CliError> {
    let image = RasterImage::open(&args.image)?;
    let image_size = image.size();
    if image_size.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "image '{}' is empty",
            args.image.display()
        )));
    }

    let pyramid_config = args.pyramid_config(config);
    let format = pyramid_config.format;
    let mut generator =
        PyramidGenerator::new(args.pin_geo, args.pin_pixel, args.native_zoom).with_config(pyramid_config);

    let max_zoom = args.max_zoom.unwrap_or(args.native_zoom);
    let min_zoom = args
        .min_zoom
        .unwrap_or_else(|| generator.min_zoom_for_viewport(max_zoom, image_size));
    if min_zoom > max_zoom {
        return Err(CliError::InvalidArgument(format!(
            "min zoom {} is above max zoom {}",
            min_zoom, max_zoom
        )));
    }

    let plan = generator.plan(min_zoom, max_zoom, image_size)?;

    info!(
        image = %args.image.display(),
        size = %image_size,
        min_zoom,
        max_zoom,
        output = %args.output.display(),
        "Generating tiles"
    );
    ensure_dir(&args.output)?;

    let bar = tile_progress(plan.render_count() as u64);
    let mut writer = FileTileWriter::new(&args.output);
    let stat = {
        let mut sink = ProgressSink {
            writer: &mut writer,
            bar: &bar,
        };
        generator.generate_plan(&plan, &image, &mut sink)
    };
    bar.finish_and_clear();

    println!("Generated {}", stat);
    println!("  Output: {}", args.output.display());

    if !args.no_metadata && !stat.is_empty() {
        let mut metadata = PyramidMetadata::from_stat(&args.pyramid_id(), &stat, image_size, format);
        if let Some(title) = &args.title {
            metadata = metadata.with_title(title);
        }
        if let Some(prefix) = &args.url_prefix {
            metadata = metadata.with_url_prefix(prefix);
        }
        let path = metadata.write_to_dir(&args.output)?;
        println!("  Metadata: {}", path.display());
    }

    if stat.failed() > 0 {
        return Err(CliError::Incomplete {
            failed: stat.failed(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use image::Rgba;
    use imagetiler::pyramid::PyramidError;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn parse(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["imagetiler"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).args
    }

    #[test]
    fn test_arguments_override_config() {
        let args = parse(&[
            "plan.png",
            "--pin-pixel",
            "523,645",
            "--pin-geo",
            "2.33535,48.86709",
            "--native-zoom",
            "17",
            "--format",
            "jpg",
            "--viewport",
            "800x600",
        ]);
        let mut config = ConfigFile::default();
        config.tiles.size = 512;
        config.viewport.width = 1024;
        config.viewport.height = 768;

        let pyramid = args.pyramid_config(&config);
        assert_eq!(pyramid.tile_size, 512);
        assert_eq!(pyramid.format, TileFormat::Jpg);
        assert_eq!(pyramid.viewport, Some(PixelSize::new(800, 600)));
        assert_eq!(args.pin_pixel, ImagePoint::new(523, 645));
        assert_eq!(args.pyramid_id(), "plan");
    }

    #[test]
    fn test_negative_pin_values() {
        let args = parse(&[
            "map.jpg",
            "--pin-pixel",
            "-10,20",
            "--pin-geo",
            "-73.9857,40.7484",
            "--native-zoom",
            "city",
        ]);
        assert_eq!(args.pin_pixel, ImagePoint::new(-10, 20));
        assert_eq!(args.pin_geo.lon(), -73.9857);
        assert_eq!(args.native_zoom, 13);
    }

    #[test]
    fn test_run_rejects_zoom_past_single_pixel_tiles() {
        let dir = tempfile::TempDir::new().unwrap();
        let image_path = dir.path().join("plan.png");
        RgbaImage::from_pixel(300, 200, Rgba([10, 120, 30, 255]))
            .save(&image_path)
            .unwrap();
        let output = dir.path().join("out");

        let args = parse(&[
            image_path.to_str().unwrap(),
            "--pin-pixel",
            "150,100",
            "--pin-geo",
            "2.33535,48.86709",
            "--native-zoom",
            "10",
            "--min-zoom",
            "10",
            "--max-zoom",
            "19",
            "--output",
            output.to_str().unwrap(),
        ]);
        let result = run(args, &ConfigFile::default());

        assert!(matches!(
            result,
            Err(CliError::Pyramid(PyramidError::ZoomTooDeep {
                zoom: 19,
                deepest_zoom: 18,
                ..
            }))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_writes_tiles_and_metadata() {
        let dir = tempfile::TempDir::new().unwrap();
        let image_path = dir.path().join("plan.png");
        RgbaImage::from_pixel(400, 300, Rgba([10, 120, 30, 255]))
            .save(&image_path)
            .unwrap();
        let output = dir.path().join("out");

        let args = parse(&[
            image_path.to_str().unwrap(),
            "--pin-pixel",
            "200,150",
            "--pin-geo",
            "2.33535,48.86709",
            "--native-zoom",
            "16",
            "--min-zoom",
            "15",
            "--output",
            output.to_str().unwrap(),
        ]);
        run(args, &ConfigFile::default()).unwrap();

        assert!(output.join("metadata.json").exists());
        assert!(output.join("16").is_dir());
        assert!(output.join("15").is_dir());
    }
}
