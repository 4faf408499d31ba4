//! Threshold (step) color scales and the linear scale used to lay out legends.
//!
//! A [`ThresholdScale`] with breakpoints `b[0..n]` and colors `c[0..=n]` maps
//! `v < b[0]` to `c[0]`, `b[i] <= v < b[i+1]` to `c[i+1]` and `v >= b[n-1]` to `c[n]`.

use crate::error::MapError;
use crate::models::Color;

/// The value interval mapped to one color. `None` marks an open end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale {
    domain: Vec<f64>,
    range: Vec<Color>,
}

impl ThresholdScale {
    /// Validate and build a scale. Breakpoints must be finite and strictly ascending,
    /// and there must be exactly one more color than breakpoints.
    pub fn new(domain: Vec<f64>, range: Vec<Color>) -> Result<Self, MapError> {
        if domain.is_empty() {
            return Err(MapError::EmptyDomain);
        }
        if range.len() != domain.len() + 1 {
            return Err(MapError::RangeLength {
                domain: domain.len(),
                range: range.len(),
            });
        }
        for (index, b) in domain.iter().enumerate() {
            if !b.is_finite() {
                return Err(MapError::NonFiniteBreakpoint { index });
            }
        }
        for (index, pair) in domain.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(MapError::DomainNotAscending {
                    index: index + 1,
                    value: pair[1],
                    previous: pair[0],
                });
            }
        }
        Ok(Self { domain, range })
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn range(&self) -> &[Color] {
        &self.range
    }

    /// Bucket index for `value`: the number of breakpoints `<= value`.
    /// NaN compares false everywhere and lands in bucket 0.
    pub fn bucket_of(&self, value: f64) -> usize {
        self.domain.partition_point(|b| *b <= value)
    }

    pub fn color_for(&self, value: f64) -> Color {
        self.range[self.bucket_of(value)]
    }

    /// Values mapping to `color`. First bucket is open below, last bucket open above.
    /// Returns `None` for a color outside the range; a repeated color resolves to its first bucket.
    pub fn invert_extent(&self, color: &Color) -> Option<Extent> {
        let i = self.range.iter().position(|c| c == color)?;
        Some(self.extent_of_bucket(i))
    }

    pub(crate) fn extent_of_bucket(&self, i: usize) -> Extent {
        Extent {
            lower: i.checked_sub(1).map(|j| self.domain[j]),
            upper: self.domain.get(i).copied(),
        }
    }

    /// Smallest and largest breakpoint.
    pub fn domain_extent(&self) -> (f64, f64) {
        (self.domain[0], self.domain[self.domain.len() - 1])
    }
}

/// Affine map from `domain` to `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            // degenerate domain
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }
}
