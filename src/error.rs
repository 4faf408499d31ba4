//! Domain errors raised by this crate.
//!
//! I/O and parsing failures are reported through `anyhow::Error` with context;
//! the variants here cover the cases a caller may want to match on.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    /// A threshold scale needs at least one breakpoint.
    #[error("threshold domain must contain at least one breakpoint")]
    EmptyDomain,

    /// `range` must hold exactly one more color than `domain` has breakpoints.
    #[error("threshold range has {range} colors but domain has {domain} breakpoints (expected {} colors)", .domain + 1)]
    RangeLength { domain: usize, range: usize },

    /// Breakpoint `index` is not strictly greater than its predecessor.
    #[error("threshold domain must be strictly ascending (breakpoint {index} is {value}, previous is {previous})")]
    DomainNotAscending {
        index: usize,
        value: f64,
        previous: f64,
    },

    #[error("threshold breakpoint {index} is not a finite number")]
    NonFiniteBreakpoint { index: usize },

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// Geometry input that is valid GeoJSON but not a FeatureCollection.
    #[error("geometry document must be a FeatureCollection, got {0}")]
    NotAFeatureCollection(&'static str),

    /// Price input that is valid JSON but not an array of objects.
    #[error("price data must be an array of objects")]
    NotARecordArray,
}
