#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const PRICES_JSON: &str = r#"[
    {"Column1": "A", "2017": 250000, "2023": 300000},
    {"Column1": "B", "2017": 260000, "2023": null},
    {"Column1": "Camden", "2017": "835,000", "2023": 850000},
    {"Column1": "Hackney", "2017": 550000}
]"#;

pub const ENGLAND_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"EER13NM": "A"},
         "geometry": {"type": "Polygon", "coordinates": [[[-2,54],[-1,54],[-1,53],[-2,53],[-2,54]]]}},
        {"type": "Feature", "properties": {"EER13NM": "B"},
         "geometry": {"type": "Polygon", "coordinates": [[[0,53],[1,53],[1,52],[0,52],[0,53]]]}}
    ]
}"#;

pub const LONDON_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "Camden"},
         "geometry": {"type": "Polygon", "coordinates": [[[-0.2,51.55],[-0.12,51.55],[-0.12,51.52],[-0.2,51.52],[-0.2,51.55]]]}},
        {"type": "Feature", "properties": {"name": "Hackney"},
         "geometry": {"type": "Polygon", "coordinates": [[[-0.1,51.57],[-0.03,51.57],[-0.03,51.53],[-0.1,51.53],[-0.1,51.57]]]}},
        {"type": "Feature", "properties": {"name": "Bexley"},
         "geometry": {"type": "Polygon", "coordinates": [[[0.1,51.47],[0.2,51.47],[0.2,51.42],[0.1,51.42],[0.1,51.47]]]}}
    ]
}"#;

pub struct Fixtures {
    pub prices: PathBuf,
    pub england: PathBuf,
    pub london: PathBuf,
}

pub fn write_fixtures(dir: &Path) -> Fixtures {
    let f = Fixtures {
        prices: dir.join("combined-data.json"),
        england: dir.join("england.json"),
        london: dir.join("london_boroughs.json"),
    };
    fs::write(&f.prices, PRICES_JSON).unwrap();
    fs::write(&f.england, ENGLAND_GEOJSON).unwrap();
    fs::write(&f.london, LONDON_GEOJSON).unwrap();
    f
}
