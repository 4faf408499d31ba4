//! Immutable configuration for the two maps.
//!
//! [`AppConfig::default`] carries the built-in England and London setup. A TOML
//! file only needs to list the values it changes:
//!
//! ```toml
//! [prices]
//! source = "data/combined-data.json"
//!
//! [london]
//! year = "2018"
//! geometry = "https://example.org/london_boroughs.json"
//! ```

use crate::error::MapError;
use crate::models::{Color, NameKey};
use crate::projection::Mercator;
use crate::scale::ThresholdScale;
use crate::source::Source;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const ENGLAND_DOMAIN: [f64; 8] = [
    200000.0, 250000.0, 300000.0, 350000.0, 400000.0, 450000.0, 500000.0, 550000.0,
];
// Shades of blue, light to dark.
const ENGLAND_COLORS: [Color; 9] = [
    Color::new(0xf7, 0xfb, 0xff),
    Color::new(0xde, 0xeb, 0xf7),
    Color::new(0xc6, 0xdb, 0xef),
    Color::new(0x9e, 0xca, 0xe1),
    Color::new(0x6b, 0xae, 0xd6),
    Color::new(0x42, 0x92, 0xc6),
    Color::new(0x21, 0x71, 0xb5),
    Color::new(0x08, 0x51, 0x9c),
    Color::new(0x08, 0x30, 0x6b),
];

// Wider span and more steps: borough prices vary far more than regional ones.
const LONDON_DOMAIN: [f64; 11] = [
    400000.0, 500000.0, 600000.0, 700000.0, 800000.0, 1000000.0, 1200000.0, 1400000.0,
    1600000.0, 1800000.0, 2000000.0,
];
const LONDON_COLORS: [Color; 12] = [
    Color::new(0xef, 0xf3, 0xff),
    Color::new(0xc6, 0xdb, 0xef),
    Color::new(0x9e, 0xca, 0xe1),
    Color::new(0x6b, 0xae, 0xd6),
    Color::new(0x42, 0x92, 0xc6),
    Color::new(0x21, 0x71, 0xb5),
    Color::new(0x08, 0x51, 0x9c),
    Color::new(0x08, 0x30, 0x6b),
    Color::new(0x04, 0x19, 0x45),
    Color::new(0x03, 0x0b, 0x1e),
    Color::new(0x02, 0x05, 0x0f),
    Color::new(0x01, 0x02, 0x05),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// `[longitude, latitude]` placed at `translate`.
    pub center: [f64; 2],
    pub scale: f64,
    /// Pixel position of `center`.
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricesConfig {
    pub source: Source,
    /// Column holding the region name.
    pub name_column: String,
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            source: Source::from("combined-data.json"),
            name_column: "Column1".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub title: String,
    pub geometry: Source,
    pub name_key: NameKey,
    /// Price column used for this map.
    pub year: String,
    pub domain: Vec<f64>,
    pub colors: Vec<Color>,
    pub projection: ProjectionConfig,
    pub width: u32,
    pub height: u32,
    pub legend_height: f64,
}

impl MapConfig {
    pub fn england() -> Self {
        Self {
            title: "England regions".into(),
            geometry: Source::from("england.json"),
            name_key: NameKey::property("EER13NM"),
            year: "2023".into(),
            domain: ENGLAND_DOMAIN.to_vec(),
            colors: ENGLAND_COLORS.to_vec(),
            projection: ProjectionConfig {
                center: [0.0, 53.0],
                scale: 5000.0,
                translate: [1300.0 / 2.0, 1000.0 / 2.0],
            },
            width: 1300,
            height: 1000,
            legend_height: 200.0,
        }
    }

    pub fn london() -> Self {
        Self {
            title: "London boroughs".into(),
            geometry: Source::from("london_boroughs.json"),
            name_key: NameKey::property("name"),
            year: "2017".into(),
            domain: LONDON_DOMAIN.to_vec(),
            colors: LONDON_COLORS.to_vec(),
            projection: ProjectionConfig {
                center: [0.0, 51.5],
                scale: 70000.0,
                translate: [1700.0 / 2.0, 900.0 / 2.0],
            },
            width: 1700,
            height: 900,
            legend_height: 200.0,
        }
    }

    /// Validated color model for this map.
    pub fn scale(&self) -> Result<ThresholdScale, MapError> {
        ThresholdScale::new(self.domain.clone(), self.colors.clone())
    }

    pub fn projection(&self) -> Mercator {
        Mercator::new(
            self.projection.center,
            self.projection.scale,
            self.projection.translate,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub prices: PricesConfig,
    pub england: MapConfig,
    pub london: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prices: PricesConfig::default(),
            england: MapConfig::england(),
            london: MapConfig::london(),
        }
    }
}

/// Partial [`MapConfig`] as written in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MapOverrides {
    title: Option<String>,
    geometry: Option<Source>,
    name_key: Option<NameKey>,
    year: Option<String>,
    domain: Option<Vec<f64>>,
    colors: Option<Vec<Color>>,
    projection: Option<ProjectionConfig>,
    width: Option<u32>,
    height: Option<u32>,
    legend_height: Option<f64>,
}

impl MapOverrides {
    fn apply(self, base: &mut MapConfig) {
        if let Some(v) = self.title {
            base.title = v;
        }
        if let Some(v) = self.geometry {
            base.geometry = v;
        }
        if let Some(v) = self.name_key {
            base.name_key = v;
        }
        if let Some(v) = self.year {
            base.year = v;
        }
        if let Some(v) = self.domain {
            base.domain = v;
        }
        if let Some(v) = self.colors {
            base.colors = v;
        }
        if let Some(v) = self.projection {
            base.projection = v;
        }
        if let Some(v) = self.width {
            base.width = v;
        }
        if let Some(v) = self.height {
            base.height = v;
        }
        if let Some(v) = self.legend_height {
            base.legend_height = v;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PricesOverrides {
    source: Option<Source>,
    name_column: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    prices: PricesOverrides,
    england: MapOverrides,
    london: MapOverrides,
}

impl AppConfig {
    /// Parse TOML overrides on top of the built-in defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FileConfig =
            toml::from_str(content).context("Failed to parse TOML configuration")?;
        let mut config = AppConfig::default();
        if let Some(v) = file.prices.source {
            config.prices.source = v;
        }
        if let Some(v) = file.prices.name_column {
            config.prices.name_column = v;
        }
        file.england.apply(&mut config.england);
        file.london.apply(&mut config.london);
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Reject color models that cannot be built before any data is loaded.
    pub fn validate(&self) -> Result<()> {
        self.england
            .scale()
            .with_context(|| format!("[england] {}", self.england.title))?;
        self.london
            .scale()
            .with_context(|| format!("[london] {}", self.london.title))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_valid_scales() {
        let cfg = AppConfig::default();
        let e = cfg.england.scale().unwrap();
        let l = cfg.london.scale().unwrap();
        assert_eq!(e.domain().len(), 8);
        assert_eq!(e.range().len(), 9);
        assert_eq!(l.domain().len(), 11);
        assert_eq!(l.range().len(), 12);
        assert_eq!(e.range()[0].to_string(), "#f7fbff");
        assert_eq!(l.range()[11].to_string(), "#010205");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn built_in_palettes_are_the_blues_ramp() {
        let hex = |cs: &[Color]| cs.iter().map(Color::to_string).collect::<Vec<_>>();
        assert_eq!(
            hex(&MapConfig::england().colors),
            [
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ]
        );
        assert_eq!(
            hex(&MapConfig::london().colors),
            [
                "#eff3ff", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
                "#08306b", "#041945", "#030b1e", "#02050f", "#010205",
            ]
        );
    }

    #[test]
    fn toml_overrides_only_listed_fields() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [prices]
            name_column = "Region"

            [london]
            year = "2018"
            name_key = ["name", "NAME"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.prices.name_column, "Region");
        assert_eq!(cfg.london.year, "2018");
        assert_eq!(cfg.london.name_key.properties(), ["name", "NAME"]);
        assert_eq!(cfg.london.domain.len(), 11);
        assert_eq!(cfg.england, MapConfig::england());
    }

    #[test]
    fn toml_with_mismatched_palette_is_rejected() {
        let err = AppConfig::from_toml_str(
            r##"
            [england]
            domain = [1.0, 2.0]
            colors = ["#000000", "#ffffff"]
            "##,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("expected 3 colors"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_toml_str("[england]\nyeer = \"2020\"\n").is_err());
    }
}
