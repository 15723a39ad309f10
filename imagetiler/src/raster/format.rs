//! Tile encodings and background fill policy.

use std::fmt;
use std::str::FromStr;

use image::{ImageFormat, Rgba};
use serde::{Deserialize, Serialize};

/// Output encoding of the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileFormat {
    /// PNG with alpha channel.
    #[default]
    Png,
    /// JPEG, RGB only.
    Jpg,
}

impl TileFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            TileFormat::Png => "png",
            TileFormat::Jpg => "jpg",
        }
    }

    /// Parses an extension or format name, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<TileFormat> {
        match ext.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(TileFormat::Png),
            "jpg" | "jpeg" => Some(TileFormat::Jpg),
            _ => None,
        }
    }

    /// Whether uncovered pixels can stay transparent.
    pub fn supports_alpha(&self) -> bool {
        matches!(self, TileFormat::Png)
    }

    /// Corresponding `image` crate format.
    pub fn image_format(&self) -> ImageFormat {
        match self {
            TileFormat::Png => ImageFormat::Png,
            TileFormat::Jpg => ImageFormat::Jpeg,
        }
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileFormat::from_extension(s)
            .ok_or_else(|| format!("unknown tile format '{}', expected png or jpg", s))
    }
}

/// How pixels of a tile not covered by the image are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Background {
    /// Transparent when the format has alpha, black otherwise.
    #[default]
    Auto,
    /// Fill with a fixed colour before drawing the image.
    Color(Rgba<u8>),
}

impl Background {
    /// Parses `auto`/`none`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    ///
    /// Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Background> {
        let value = value.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case("auto")
            || value.eq_ignore_ascii_case("none")
        {
            return Some(Background::Auto);
        }

        let hex = value.strip_prefix('#').unwrap_or(value);
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Background::Color(Rgba([
            channel(0)?,
            channel(2)?,
            channel(4)?,
            alpha,
        ])))
    }

    /// The fill colour used for a tile encoded as `format`.
    pub fn fill_for(&self, format: TileFormat) -> Rgba<u8> {
        match self {
            Background::Color(color) => *color,
            Background::Auto if format.supports_alpha() => Rgba([0, 0, 0, 0]),
            Background::Auto => Rgba([0, 0, 0, 255]),
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Auto => f.write_str("auto"),
            Background::Color(Rgba([r, g, b, 255])) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Background::Color(Rgba([r, g, b, a])) => {
                write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extension() {
        assert_eq!(TileFormat::Png.extension(), "png");
        assert_eq!(TileFormat::Jpg.extension(), "jpg");
        assert_eq!(TileFormat::default(), TileFormat::Png);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(TileFormat::from_extension("PNG"), Some(TileFormat::Png));
        assert_eq!(TileFormat::from_extension(".jpeg"), Some(TileFormat::Jpg));
        assert_eq!(TileFormat::from_extension("gif"), None);
        assert_eq!("jpg".parse::<TileFormat>(), Ok(TileFormat::Jpg));
        assert!("webp".parse::<TileFormat>().is_err());
    }

    #[test]
    fn test_background_parse() {
        assert_eq!(Background::parse("auto"), Some(Background::Auto));
        assert_eq!(Background::parse(""), Some(Background::Auto));
        assert_eq!(
            Background::parse("#ff8000"),
            Some(Background::Color(Rgba([255, 128, 0, 255])))
        );
        assert_eq!(
            Background::parse("FFFFFF80"),
            Some(Background::Color(Rgba([255, 255, 255, 128])))
        );
        assert_eq!(Background::parse("#fff"), None);
        assert_eq!(Background::parse("#gg0000"), None);
    }

    #[test]
    fn test_background_display_roundtrip() {
        for text in ["auto", "#ff8000", "#01020304"] {
            let bg = Background::parse(text).unwrap();
            assert_eq!(bg.to_string(), text);
        }
    }

    #[test]
    fn test_fill_policy() {
        let white = Rgba([255, 255, 255, 255]);
        assert_eq!(Background::Color(white).fill_for(TileFormat::Png), white);
        assert_eq!(Background::Color(white).fill_for(TileFormat::Jpg), white);
        assert_eq!(Background::Auto.fill_for(TileFormat::Png), Rgba([0, 0, 0, 0]));
        assert_eq!(Background::Auto.fill_for(TileFormat::Jpg), Rgba([0, 0, 0, 255]));
    }
}
