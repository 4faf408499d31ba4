//! Joins region geometry to prices and resolves each region's fill and outline.

use crate::format::tooltip_html;
use crate::index::PriceIndex;
use crate::models::{Fill, JoinedRow, RegionFeature};
use crate::projection::Mercator;
use crate::scale::ThresholdScale;

/// One drawable region.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: String,
    pub price: Option<f64>,
    pub fill: Fill,
    /// SVG path data in map pixel coordinates.
    pub path: String,
    /// Projected exterior rings, used by raster snapshots.
    pub outlines: Vec<Vec<(f64, f64)>>,
}

impl Shape {
    pub fn tooltip_html(&self) -> String {
        tooltip_html(&self.name, self.price)
    }
}

/// Shapes for one map, in feature order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedMap {
    pub shapes: Vec<Shape>,
}

impl RenderedMap {
    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.name == name)
    }

    pub fn no_data_count(&self) -> usize {
        self.shapes.iter().filter(|s| s.fill.is_no_data()).count()
    }

    /// The joined table: one row per shape.
    pub fn joined_rows(&self) -> Vec<JoinedRow> {
        self.shapes
            .iter()
            .map(|s| JoinedRow {
                name: s.name.clone(),
                price: s.price,
                color: s.fill.color().to_string(),
            })
            .collect()
    }
}

pub struct RegionRenderer<'a> {
    scale: &'a ThresholdScale,
    projection: &'a Mercator,
}

impl<'a> RegionRenderer<'a> {
    pub fn new(scale: &'a ThresholdScale, projection: &'a Mercator) -> Self {
        Self { scale, projection }
    }

    /// Fill for a region: its bucket color if priced, otherwise no-data.
    pub fn fill_for(&self, price: Option<f64>) -> Fill {
        match price {
            Some(p) => Fill::Bucket(self.scale.color_for(p)),
            None => Fill::NoData,
        }
    }

    pub fn render(&self, features: &[RegionFeature], index: &PriceIndex) -> RenderedMap {
        let shapes: Vec<Shape> = features
            .iter()
            .map(|f| {
                let price = index.get(&f.name);
                Shape {
                    name: f.name.clone(),
                    price,
                    fill: self.fill_for(price),
                    path: self.projection.path_data(&f.geometry),
                    outlines: self.projection.project_exteriors(&f.geometry),
                }
            })
            .collect();
        let map = RenderedMap { shapes };
        log::debug!(
            "rendered {} regions ({} without a {} price)",
            map.shapes.len(),
            map.no_data_count(),
            index.year()
        );
        map
    }
}
