//! INI parsing: the one place where INI keys map to struct fields.

use std::path::PathBuf;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::raster::{Background, TileFormat};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("tiles")) {
        if let Some(v) = value(section, "size") {
            config.tiles.size = match v.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(invalid("tiles", "size", v, "must be a positive integer")),
            };
        }
        if let Some(v) = value(section, "format") {
            config.tiles.format = TileFormat::from_extension(v)
                .ok_or_else(|| invalid("tiles", "format", v, "must be 'png' or 'jpg'"))?;
        }
        if let Some(v) = section.get("background") {
            config.tiles.background = Background::parse(v).ok_or_else(|| {
                invalid(
                    "tiles",
                    "background",
                    v,
                    "must be 'auto' or a hex colour like '#ffffff' or '#00000080'",
                )
            })?;
        }
    }

    if let Some(section) = ini.section(Some("viewport")) {
        if let Some(v) = value(section, "width") {
            config.viewport.width = v
                .parse()
                .map_err(|_| invalid("viewport", "width", v, "must be a non-negative integer"))?;
        }
        if let Some(v) = value(section, "height") {
            config.viewport.height = v
                .parse()
                .map_err(|_| invalid("viewport", "height", v, "must be a non-negative integer"))?;
        }
    }

    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = value(section, "base_url") {
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(invalid("download", "base_url", v, "must be an http(s) URL"));
            }
            config.download.base_url = v.to_string();
        }
        if let Some(v) = value(section, "timeout") {
            config.download.timeout = match v.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "download",
                        "timeout",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
    }

    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = value(section, "level") {
            config.logging.level = v.to_string();
        }
        if let Some(v) = value(section, "file") {
            config.logging.file = Some(expand_tilde(v));
        }
    }

    Ok(config)
}

/// Trimmed value of `key`, absent when empty.
fn value<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelSize;
    use image::Rgba;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_full_file() {
        let config = load(
            r#"
[tiles]
size = 512
format = jpg
background = #ffffff

[viewport]
width = 1024
height = 768

[download]
base_url = http://localhost:8080/tiles/
timeout = 5

[logging]
level = imagetiler=debug
file = /tmp/imagetiler.log
"#,
        )
        .unwrap();

        assert_eq!(config.tiles.size, 512);
        assert_eq!(config.tiles.format, TileFormat::Jpg);
        assert_eq!(
            config.tiles.background,
            Background::Color(Rgba([255, 255, 255, 255]))
        );
        assert_eq!(config.viewport.size(), Some(PixelSize::new(1024, 768)));
        assert_eq!(config.download.base_url, "http://localhost:8080/tiles/");
        assert_eq!(config.download.timeout, 5);
        assert_eq!(config.logging.level, "imagetiler=debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/imagetiler.log")));
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let config = load("[tiles]\nsize =\n[logging]\nfile =\n").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_invalid_tile_size() {
        let err = load("[tiles]\nsize = 0\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "size"));
        assert!(err.to_string().contains("tiles.size = '0'"));
    }

    #[test]
    fn test_invalid_format() {
        let err = load("[tiles]\nformat = webp\n").unwrap_err();
        assert!(err.to_string().contains("must be 'png' or 'jpg'"));
    }

    #[test]
    fn test_invalid_background() {
        assert!(load("[tiles]\nbackground = red\n").is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(load("[download]\ntimeout = soon\n").is_err());
        assert!(load("[download]\ntimeout = 0\n").is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let err = load("[download]\nbase_url = ftp://tiles\n").unwrap_err();
        assert!(err.to_string().contains("download.base_url"));
    }

    #[test]
    fn test_zero_viewport_is_none() {
        let config = load("[viewport]\nwidth = 1024\nheight = 0\n").unwrap();
        assert_eq!(config.viewport.size(), None);
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/var/log/x.log"), PathBuf::from("/var/log/x.log"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.log"), home.join("x.log"));
        }
    }
}
