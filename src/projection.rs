//! Spherical Mercator projection onto SVG pixel coordinates, and SVG path data.

use geo::{LineString, MultiPolygon};
use std::f64::consts::FRAC_PI_4;
use std::fmt::Write;

const MERCATOR_MAX_LAT_DEG: f64 = 85.05112878;

/// Mercator projection configured like a web map: `center` (lon, lat in degrees)
/// lands on pixel `translate`, `scale` is pixels per radian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    center: [f64; 2],
    scale: f64,
    translate: [f64; 2],
}

fn mercator_y(lat_deg: f64) -> f64 {
    let lat = lat_deg
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    (FRAC_PI_4 + lat / 2.0).tan().ln()
}

impl Mercator {
    pub fn new(center: [f64; 2], scale: f64, translate: [f64; 2]) -> Self {
        Self {
            center,
            scale,
            translate,
        }
    }

    /// Project `(lon, lat)` in degrees to pixel `(x, y)`; y grows downward.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let dx = (lon - self.center[0]).to_radians();
        let dy = mercator_y(lat) - mercator_y(self.center[1]);
        (
            self.translate[0] + self.scale * dx,
            self.translate[1] - self.scale * dy,
        )
    }

    /// Projected ring vertices without the closing duplicate.
    pub fn project_ring(&self, ring: &LineString<f64>) -> Vec<(f64, f64)> {
        let mut pts: Vec<(f64, f64)> = ring.coords().map(|c| self.project(c.x, c.y)).collect();
        if pts.len() > 1 && pts.first() == pts.last() {
            pts.pop();
        }
        pts
    }

    /// Every ring (exteriors and holes) of `shape` as projected vertex lists.
    pub fn project_rings(&self, shape: &MultiPolygon<f64>) -> Vec<Vec<(f64, f64)>> {
        shape
            .iter()
            .flat_map(|poly| std::iter::once(poly.exterior()).chain(poly.interiors()))
            .map(|ring| self.project_ring(ring))
            .filter(|ring| !ring.is_empty())
            .collect()
    }

    /// Projected exterior rings only, one per polygon.
    pub fn project_exteriors(&self, shape: &MultiPolygon<f64>) -> Vec<Vec<(f64, f64)>> {
        shape
            .iter()
            .map(|poly| self.project_ring(poly.exterior()))
            .filter(|ring| !ring.is_empty())
            .collect()
    }

    /// SVG `d` attribute for `shape`: one `M … Z` subpath per ring, two decimals.
    /// Holes are drawn with the even-odd rule by the caller.
    pub fn path_data(&self, shape: &MultiPolygon<f64>) -> String {
        let mut d = String::new();
        for ring in self.project_rings(shape) {
            for (i, (x, y)) in ring.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{cmd}{x:.2},{y:.2}");
            }
            d.push('Z');
        }
        d
    }
}
