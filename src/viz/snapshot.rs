//! Static snapshot of one map: filled regions plus legend swatches, as SVG or PNG.
//!
//! Plotters has no even-odd fill, so regions are painted largest first and holes
//! are not cut; a region sitting inside another's hole is drawn on top of it.
//! Snapshots carry no text.

use super::legend::{LEGEND_ORIGIN, Legend};
use crate::models::Color as MapColor;
use crate::render::RenderedMap;
use anyhow::{Result, anyhow};
use geo::{Area, LineString, Polygon as GeoPolygon};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

fn rgb(c: MapColor) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn outline_area(ring: &[(f64, f64)]) -> f64 {
    GeoPolygon::new(LineString::from(ring.to_vec()), vec![]).unsigned_area()
}

/// Write `map` to `out_path`; `.svg` selects the SVG backend, anything else a bitmap.
pub fn render_snapshot<P: AsRef<Path>>(
    map: &RenderedMap,
    legend: &Legend,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if map.shapes.is_empty() {
        return Err(anyhow!("no regions to draw"));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_snapshot(root, map, legend)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_snapshot(root, map, legend)?;
    }
    log::info!("wrote snapshot {}", out_path.display());
    Ok(())
}

fn draw_snapshot<DB>(root: DrawingArea<DB, Shift>, map: &RenderedMap, legend: &Legend) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    // (area, fill, outline) so that enclosing regions go down first
    let mut outlines: Vec<(f64, MapColor, Vec<(i32, i32)>)> = map
        .shapes
        .iter()
        .flat_map(|s| {
            let color = s.fill.color();
            s.outlines.iter().map(move |ring| {
                let pts: Vec<(i32, i32)> = ring
                    .iter()
                    .map(|(x, y)| (x.round() as i32, y.round() as i32))
                    .collect();
                (outline_area(ring), color, pts)
            })
        })
        .collect();
    outlines.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, color, pts) in &outlines {
        if pts.len() < 3 {
            continue;
        }
        root.draw(&Polygon::new(pts.clone(), rgb(*color).filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
        let mut closed = pts.clone();
        closed.push(pts[0]);
        root.draw(&PathElement::new(closed, WHITE.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let (ox, oy) = (LEGEND_ORIGIN.0, LEGEND_ORIGIN.1);
    for e in legend.entries.iter().filter(|e| e.height > 0.0) {
        let top_left = (ox.round() as i32, (oy + e.y).round() as i32);
        let bottom_right = (
            (ox + legend.width).round() as i32,
            (oy + e.y + e.height).round() as i32,
        );
        root.draw(&Rectangle::new([top_left, bottom_right], rgb(e.color).filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
