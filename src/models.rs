use crate::error::MapError;
use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 8-bit RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MapError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| MapError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = MapError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How a rendered region is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Price known: the threshold bucket color.
    Bucket(Color),
    /// No price for this region name.
    NoData,
}

/// Neutral gray used for regions without a price.
pub const NO_DATA_COLOR: Color = Color::new(0xcc, 0xcc, 0xcc);

impl Fill {
    /// The color actually painted.
    pub fn color(&self) -> Color {
        match *self {
            Fill::Bucket(c) => c,
            Fill::NoData => NO_DATA_COLOR,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Fill::NoData)
    }
}

/// One row of price input: a region name and the year columns holding a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub name: Option<String>,
    pub years: BTreeMap<String, f64>,
}

impl PriceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            years: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly for tests and fixtures.
    pub fn with_year(mut self, year: impl Into<String>, value: f64) -> Self {
        self.years.insert(year.into(), value);
        self
    }

    /// Build a record from a flat JSON object. `name_column` selects the join key;
    /// every other key holding a number (or a numeric string) becomes a year value.
    pub fn from_json_object(obj: &Map<String, Value>, name_column: &str) -> Self {
        let name = obj.get(name_column).and_then(value_as_name);
        let years = obj
            .iter()
            .filter(|(k, _)| k.as_str() != name_column)
            .filter_map(|(k, v)| value_as_number(v).map(|n| (k.clone(), n)))
            .collect();
        Self { name, years }
    }

    pub fn value(&self, year: &str) -> Option<f64> {
        self.years.get(year).copied()
    }
}

/// Numeric cell: JSON number or a string that parses as one. Empty and null cells are absent.
pub(crate) fn value_as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_cell(s),
        _ => None,
    }
}

/// Accepts `"300000"`, `"300,000"` and surrounding whitespace.
pub(crate) fn parse_numeric_cell(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    let cleaned: String = t.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Join key: surrounding whitespace trimmed, otherwise verbatim.
fn value_as_name(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Which feature property carries the region name for a geometry dataset.
///
/// Properties are tried in order; the first non-empty one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NameKeyRepr", into = "Vec<String>")]
pub struct NameKey {
    properties: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameKeyRepr {
    One(String),
    Many(Vec<String>),
}

impl From<NameKeyRepr> for NameKey {
    fn from(r: NameKeyRepr) -> Self {
        match r {
            NameKeyRepr::One(p) => NameKey::property(p),
            NameKeyRepr::Many(ps) => NameKey::first_of(ps),
        }
    }
}

impl From<NameKey> for Vec<String> {
    fn from(k: NameKey) -> Self {
        k.properties
    }
}

impl NameKey {
    pub fn property(name: impl Into<String>) -> Self {
        Self {
            properties: vec![name.into()],
        }
    }

    pub fn first_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn resolve(&self, props: &Map<String, Value>) -> Option<String> {
        self.properties
            .iter()
            .find_map(|p| props.get(p).and_then(value_as_name))
    }
}

/// A named region boundary, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

/// One row of the joined table (export / report).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRow {
    pub name: String,
    pub price: Option<f64>,
    pub color: String,
}
