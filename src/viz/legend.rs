//! Vertical threshold legend: one swatch per color bucket plus a labelled axis.
//!
//! Values are laid out with a linear scale from `[min(domain), max(domain)]` to
//! `[height, 0]`, so larger prices sit nearer the top. Buckets that are open at
//! one end are clamped to the domain extent, which gives the outermost swatches
//! zero height.

use crate::format::format_si_price;
use crate::models::Color;
use crate::scale::{LinearScale, ThresholdScale};

/// Width of each color swatch in pixels.
pub const LEGEND_WIDTH: f64 = 20.0;
/// Length of an axis tick in pixels.
pub const TICK_SIZE: f64 = 5.0;
/// Legend group offset inside the map surface.
pub const LEGEND_ORIGIN: (f64, f64) = (20.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    pub lower: f64,
    pub upper: f64,
    pub color: Color,
    /// Top edge of the swatch (pixel y of `upper`).
    pub y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub ticks: Vec<LegendTick>,
    pub width: f64,
    pub height: f64,
}

fn extent_of(values: &[f64]) -> Option<(f64, f64)> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

/// Build swatches for every color of `scale` and one tick per breakpoint.
///
/// `domain` sets the value extent of the axis; an empty slice falls back to the
/// scale's own breakpoints.
pub fn build_legend(scale: &ThresholdScale, domain: &[f64], height_px: f64) -> Legend {
    let (min, max) = extent_of(domain).unwrap_or_else(|| scale.domain_extent());
    let y = LinearScale::new((min, max), (height_px, 0.0));

    let entries = scale
        .range()
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let extent = scale.extent_of_bucket(i);
            let lower = extent.lower.unwrap_or(min);
            let upper = extent.upper.unwrap_or(max);
            LegendEntry {
                lower,
                upper,
                color: *color,
                y: y.apply(upper),
                height: y.apply(lower) - y.apply(upper),
            }
        })
        .collect();

    let ticks = scale
        .domain()
        .iter()
        .map(|&value| LegendTick {
            value,
            y: y.apply(value),
            label: format_si_price(value),
        })
        .collect();

    Legend {
        entries,
        ticks,
        width: LEGEND_WIDTH,
        height: height_px,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;

    #[test]
    fn one_entry_per_color_with_clamped_open_ends() {
        let cfg = MapConfig::england();
        let scale = cfg.scale().unwrap();
        let legend = build_legend(&scale, &cfg.domain, 200.0);
        assert_eq!(legend.entries.len(), scale.range().len());

        let first = legend.entries[0];
        assert_eq!((first.lower, first.upper), (200000.0, 200000.0));
        assert_eq!(first.height, 0.0);
        let last = legend.entries[legend.entries.len() - 1];
        assert_eq!((last.lower, last.upper), (550000.0, 550000.0));

        for e in &legend.entries {
            assert!(e.lower <= e.upper);
            assert!(e.height >= 0.0);
            assert!(e.y >= 0.0 && e.y + e.height <= 200.0 + 1e-9);
        }
        // 200k..250k spans 50k of 350k → 200 * 50/350 px, drawn at the bottom
        let second = legend.entries[1];
        assert!((second.height - 200.0 * 50.0 / 350.0).abs() < 1e-9);
        assert!((second.y + second.height - 200.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_are_breakpoints_with_si_labels() {
        let cfg = MapConfig::london();
        let scale = cfg.scale().unwrap();
        let legend = build_legend(&scale, &cfg.domain, 200.0);
        let labels: Vec<&str> = legend.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels[0], "£400k");
        assert_eq!(labels[5], "£1.0M");
        assert_eq!(labels[10], "£2.0M");
        assert_eq!(legend.ticks[0].y, 200.0);
        assert_eq!(legend.ticks[10].y, 0.0);
    }

    #[test]
    fn empty_domain_falls_back_to_scale_breakpoints() {
        let scale = MapConfig::england().scale().unwrap();
        assert_eq!(build_legend(&scale, &[], 100.0), build_legend(&scale, scale.domain(), 100.0));
    }
}
