//! Serialises a `ConfigFile` to the commented INI written by `init`.

use super::settings::ConfigFile;

pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        r#"[tiles]
; Edge of one output tile in pixels
size = {}
; Tile encoding: png (keeps transparency) or jpg
format = {}
; Fill for areas outside the image: auto, or a hex colour such as #ffffff
; auto = transparent for png, black for jpg
background = {}

[viewport]
; Minimum area in pixels every zoom level must cover (0 = no padding)
width = {}
height = {}

[download]
; Tile server used by 'imagetiler download'
base_url = {}
; Request timeout in seconds
timeout = {}

[logging]
; Log filter, e.g. info, debug, imagetiler=trace (RUST_LOG overrides)
level = {}
; Optional log file, in addition to stderr
file = {}
"#,
        config.tiles.size,
        config.tiles.format,
        config.tiles.background,
        config.viewport.width,
        config.viewport.height,
        config.download.base_url,
        config.download.timeout,
        config.logging.level,
        log_file,
    )
}
