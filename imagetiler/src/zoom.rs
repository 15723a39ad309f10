//! Named zoom level presets.
//!
//! ```text
//!   level  preset      typical content
//!     0    world       whole world
//!     9    wide-area   region
//!    11    area        county
//!    13    city        village or town
//!    16    street      small road
//!    17    building    buildings
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomLevel {
    World,
    WideArea,
    Area,
    City,
    #[default]
    Street,
    Building,
}

impl ZoomLevel {
    /// All presets, lowest level first.
    pub const ALL: [ZoomLevel; 6] = [
        ZoomLevel::World,
        ZoomLevel::WideArea,
        ZoomLevel::Area,
        ZoomLevel::City,
        ZoomLevel::Street,
        ZoomLevel::Building,
    ];

    /// The slippy-map zoom of this preset.
    pub fn level(&self) -> u8 {
        match self {
            ZoomLevel::World => 0,
            ZoomLevel::WideArea => 9,
            ZoomLevel::Area => 11,
            ZoomLevel::City => 13,
            ZoomLevel::Street => 16,
            ZoomLevel::Building => 17,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZoomLevel::World => "world",
            ZoomLevel::WideArea => "wide-area",
            ZoomLevel::Area => "area",
            ZoomLevel::City => "city",
            ZoomLevel::Street => "street",
            ZoomLevel::Building => "building",
        }
    }

    /// The highest preset not deeper than `level`.
    ///
    /// Negative levels give [`ZoomLevel::World`], levels past the last
    /// preset give [`ZoomLevel::Building`].
    pub fn from_level(level: i64) -> ZoomLevel {
        Self::ALL
            .iter()
            .rev()
            .find(|preset| preset.level() as i64 <= level)
            .copied()
            .unwrap_or(ZoomLevel::World)
    }

    /// Parses a preset name (case-insensitive, `-`/`_` optional) or a number.
    ///
    /// Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<ZoomLevel> {
        let value = value.trim();
        if let Ok(level) = value.parse::<i64>() {
            return Some(Self::from_level(level));
        }

        let normalized: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().replace('-', "") == normalized)
    }

    /// Like [`Self::parse`], falling back to the default preset.
    pub fn parse_or_default(value: &str) -> ZoomLevel {
        Self::parse(value).unwrap_or_default()
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZoomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoomLevel::parse(s).ok_or_else(|| {
            format!(
                "unknown zoom level '{}', expected a number or one of: world, wide-area, area, city, street, building",
                s
            )
        })
    }
}

impl From<ZoomLevel> for u8 {
    fn from(level: ZoomLevel) -> u8 {
        level.level()
    }
}
