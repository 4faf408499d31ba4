//! Load → index → render → legend, for both maps.

use crate::config::{AppConfig, MapConfig};
use crate::index::PriceIndex;
use crate::loader::Inputs;
use crate::models::{PriceRecord, RegionFeature};
use crate::render::{RegionRenderer, RenderedMap};
use crate::stats::{JoinReport, join_report};
use crate::viz::{Legend, MapPanel, build_legend};
use anyhow::{Result, anyhow};

/// Everything derived for one map.
#[derive(Debug, Clone)]
pub struct BuiltMap {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub map: RenderedMap,
    pub legend: Legend,
    pub report: JoinReport,
}

impl BuiltMap {
    pub fn panel(&self) -> MapPanel {
        MapPanel::Ready {
            title: self.title.clone(),
            map: self.map.clone(),
            legend: self.legend.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Index the prices for this map's year, join them to the features and lay out the legend.
pub fn build_map(
    config: &MapConfig,
    features: &[RegionFeature],
    records: &[PriceRecord],
) -> Result<BuiltMap> {
    let scale = config.scale()?;
    let projection = config.projection();
    let index = PriceIndex::build(records, &config.year);
    let map = RegionRenderer::new(&scale, &projection).render(features, &index);
    let legend = build_legend(&scale, &config.domain, config.legend_height);
    let report = join_report(features, &index);
    log::info!(
        "{}: {} of {} regions priced for {}",
        config.title,
        report.matched,
        report.regions,
        config.year
    );
    Ok(BuiltMap {
        title: config.title.clone(),
        width: config.width,
        height: config.height,
        map,
        legend,
        report,
    })
}

/// Both maps, each independently built or failed.
#[derive(Debug)]
pub struct Maps {
    pub england: Result<BuiltMap>,
    pub london: Result<BuiltMap>,
}

impl Maps {
    /// Page panels in display order; failures become error panels.
    pub fn panels(&self, config: &AppConfig) -> Vec<MapPanel> {
        [
            (&self.england, &config.england.title),
            (&self.london, &config.london.title),
        ]
        .into_iter()
        .map(|(built, title)| match built {
            Ok(b) => b.panel(),
            Err(e) => MapPanel::Failed {
                title: title.clone(),
                message: format!("{e:#}"),
            },
        })
        .collect()
    }

    pub fn any_failed(&self) -> bool {
        self.england.is_err() || self.london.is_err()
    }
}

fn build_one(
    config: &MapConfig,
    features: &Result<Vec<RegionFeature>>,
    records: &Result<Vec<PriceRecord>>,
) -> Result<BuiltMap> {
    let records = records
        .as_ref()
        .map_err(|e| anyhow!("price data unavailable: {e:#}"))?;
    let features = features
        .as_ref()
        .map_err(|e| anyhow!("geometry unavailable: {e:#}"))?;
    build_map(config, features, records)
}

/// Build each map whose price data and geometry both loaded.
pub fn build_maps(config: &AppConfig, inputs: &Inputs) -> Maps {
    let maps = Maps {
        england: build_one(&config.england, &inputs.england, &inputs.prices),
        london: build_one(&config.london, &inputs.london, &inputs.prices),
    };
    for (title, built) in [
        (&config.england.title, &maps.england),
        (&config.london.title, &maps.london),
    ] {
        if let Err(e) = built {
            log::error!("{title}: {e:#}");
        }
    }
    maps
}
