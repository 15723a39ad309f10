//! Source images and tile canvases.
//!
//! The pyramid code only sees an [`ImageSource`]: something with a size and
//! a rectangle-to-rectangle copy. [`RasterImage`] implements it on top of an
//! in-memory `image::RgbaImage`.

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

use super::{Background, PixelRect, PixelSize, RasterError, TileFormat};

/// A readable image the pyramid can be cut from.
///
/// Implementations must be shareable between threads so tiles of one zoom
/// level can be rendered in parallel.
pub trait ImageSource: Sync {
    /// Size of the image in pixels.
    fn size(&self) -> PixelSize;

    /// Copies the `source` rectangle of the image into the `target`
    /// rectangle of `canvas`, resampling when the two differ in size.
    ///
    /// Both rectangles are already clipped to their images; empty rectangles
    /// must be ignored.
    fn copy_rect(&self, source: PixelRect, canvas: &mut RgbaImage, target: PixelRect);
}

/// An in-memory RGBA image.
#[derive(Debug, Clone)]
pub struct RasterImage {
    image: RgbaImage,
}

impl RasterImage {
    /// Wraps an existing buffer.
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decodes an image file, converting it to RGBA.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or decodes to
    /// an image without pixels.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RasterError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| RasterError::Open {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();

        if image.width() == 0 || image.height() == 0 {
            return Err(RasterError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Loaded source image"
        );
        Ok(Self { image })
    }

    /// The underlying pixel buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8())
    }
}

impl ImageSource for RasterImage {
    fn size(&self) -> PixelSize {
        PixelSize::new(self.image.width(), self.image.height())
    }

    fn copy_rect(&self, source: PixelRect, canvas: &mut RgbaImage, target: PixelRect) {
        let source = source.intersect(&PixelRect::from_size(self.size()));
        let target = target.intersect(&PixelRect::new(
            0,
            0,
            canvas.width() as i64,
            canvas.height() as i64,
        ));
        if source.is_empty() || target.is_empty() {
            return;
        }

        let region = imageops::crop_imm(
            &self.image,
            source.left as u32,
            source.top as u32,
            source.width() as u32,
            source.height() as u32,
        )
        .to_image();

        let (width, height) = (target.width() as u32, target.height() as u32);
        let region = if region.dimensions() == (width, height) {
            region
        } else {
            imageops::resize(&region, width, height, FilterType::CatmullRom)
        };

        imageops::overlay(canvas, &region, target.left, target.top);
    }
}

/// Creates an empty square tile canvas filled according to `background`.
pub fn new_canvas(tile_size: u32, background: Background, format: TileFormat) -> RgbaImage {
    RgbaImage::from_pixel(tile_size, tile_size, background.fill_for(format))
}

/// Encodes a tile canvas to the bytes of a `format` file.
///
/// JPEG tiles drop the alpha channel.
pub fn encode_tile(tile: &RgbaImage, format: TileFormat) -> Result<Vec<u8>, RasterError> {
    let mut bytes = Cursor::new(Vec::new());
    let result = match format {
        TileFormat::Png => tile.write_to(&mut bytes, format.image_format()),
        TileFormat::Jpg => DynamicImage::ImageRgba8(tile.clone())
            .into_rgb8()
            .write_to(&mut bytes, format.image_format()),
    };
    result.map_err(|source| RasterError::Encode { format, source })?;
    Ok(bytes.into_inner())
}
