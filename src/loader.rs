//! Loading price records and region geometry, and the concurrent load of all three inputs.

use crate::config::AppConfig;
use crate::error::MapError;
use crate::models::{NameKey, PriceRecord, RegionFeature, parse_numeric_cell};
use crate::source::Source;
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use geo::MultiPolygon;
use geojson::GeoJson;
use serde_json::Value;
use std::collections::BTreeMap;

/// Read price records; `.csv` sources are parsed as CSV, everything else as JSON.
pub fn load_price_records(source: &Source, name_column: &str) -> Result<Vec<PriceRecord>> {
    let text = source.read_to_string()?;
    let records = match source.extension().as_deref() {
        Some("csv") => parse_price_csv(&text, name_column),
        _ => parse_price_json(&text, name_column),
    }
    .with_context(|| format!("Failed to parse price data from {source}"))?;
    log::info!("loaded {} price records from {source}", records.len());
    Ok(records)
}

/// JSON array of flat objects. `null` entries are skipped.
pub fn parse_price_json(text: &str, name_column: &str) -> Result<Vec<PriceRecord>> {
    let doc: Value = serde_json::from_str(text).context("invalid JSON")?;
    let rows = doc.as_array().ok_or(MapError::NotARecordArray)?;
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match row {
            Value::Object(obj) => out.push(PriceRecord::from_json_object(obj, name_column)),
            Value::Null => {}
            other => log::warn!("skipping price row {i}: expected an object, got {other}"),
        }
    }
    Ok(out)
}

/// CSV with a header row; `name_column` must be one of the headers.
pub fn parse_price_csv(text: &str, name_column: &str) -> Result<Vec<PriceRecord>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = rdr.headers().context("missing CSV header row")?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h.trim() == name_column)
        .ok_or_else(|| anyhow!("Join column '{}' not found in CSV", name_column))?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let name = record
            .get(name_idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let years: BTreeMap<String, f64> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != name_idx)
            .filter_map(|(i, h)| {
                let v = parse_numeric_cell(record.get(i)?)?;
                Some((h.trim().to_string(), v))
            })
            .collect();
        out.push(PriceRecord { name, years });
    }
    Ok(out)
}

pub fn load_features(source: &Source, name_key: &NameKey) -> Result<Vec<RegionFeature>> {
    let text = source.read_to_string()?;
    let features = parse_features(&text, name_key)
        .with_context(|| format!("Failed to parse GeoJSON from {source}"))?;
    log::info!("loaded {} region features from {source}", features.len());
    Ok(features)
}

/// Polygonal features of a FeatureCollection, named through `name_key`.
/// Features without a resolvable name or without polygon geometry are skipped.
pub fn parse_features(text: &str, name_key: &NameKey) -> Result<Vec<RegionFeature>> {
    let geojson: GeoJson = text.parse().context("invalid GeoJSON")?;
    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(_) => return Err(MapError::NotAFeatureCollection("Feature").into()),
        GeoJson::Geometry(_) => return Err(MapError::NotAFeatureCollection("Geometry").into()),
    };

    let mut out = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.into_iter().enumerate() {
        let Some(name) = feature
            .properties
            .as_ref()
            .and_then(|props| name_key.resolve(props))
        else {
            log::warn!(
                "skipping feature {i}: none of {:?} holds a name",
                name_key.properties()
            );
            continue;
        };
        let Some(geom) = feature.geometry else {
            log::warn!("skipping feature {name:?}: no geometry");
            continue;
        };
        let geometry: geo::Geometry<f64> = geom
            .value
            .try_into()
            .map_err(|e| anyhow!("Failed to convert geometry of {name:?}: {e:?}"))?;
        let geometry = match geometry {
            geo::Geometry::MultiPolygon(mp) => mp,
            geo::Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
            _ => {
                log::warn!("skipping feature {name:?}: not a polygon");
                continue;
            }
        };
        out.push(RegionFeature { name, geometry });
    }
    Ok(out)
}

/// Result of loading every input; each part fails independently.
#[derive(Debug)]
pub struct Inputs {
    pub prices: Result<Vec<PriceRecord>>,
    pub england: Result<Vec<RegionFeature>>,
    pub london: Result<Vec<RegionFeature>>,
}

/// Load the price data and both geometry sets concurrently. The two geometry
/// loads are joined together; the price load runs alongside them.
pub fn load_inputs(config: &AppConfig) -> Inputs {
    let (prices, (england, london)) = rayon::join(
        || load_price_records(&config.prices.source, &config.prices.name_column),
        || {
            rayon::join(
                || load_features(&config.england.geometry, &config.england.name_key),
                || load_features(&config.london.geometry, &config.london.name_key),
            )
        },
    );
    Inputs {
        prices,
        england,
        london,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"EER13NM": "North East"},
             "geometry": {"type": "Polygon", "coordinates": [[[-2,55],[-1,55],[-1,54],[-2,54],[-2,55]]]}},
            {"type": "Feature", "properties": {"EER13NM": "Islands"},
             "geometry": {"type": "MultiPolygon", "coordinates": [[[[0,50],[1,50],[1,51],[0,50]]],[[[2,50],[3,50],[3,51],[2,50]]]]}},
            {"type": "Feature", "properties": {"other": "x"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}},
            {"type": "Feature", "properties": {"EER13NM": "A point"},
             "geometry": {"type": "Point", "coordinates": [0, 0]}}
        ]
    }"#;

    #[test]
    fn features_keep_named_polygons_only() {
        let fs = parse_features(REGIONS, &NameKey::property("EER13NM")).unwrap();
        let names: Vec<&str> = fs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["North East", "Islands"]);
        assert_eq!(fs[0].geometry.0.len(), 1);
        assert_eq!(fs[1].geometry.0.len(), 2);
    }

    #[test]
    fn geometry_document_must_be_a_collection() {
        let err = parse_features(
            r#"{"type": "Point", "coordinates": [0, 0]}"#,
            &NameKey::property("name"),
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<MapError>(),
            Some(&MapError::NotAFeatureCollection("Geometry"))
        );
    }

    #[test]
    fn json_prices_skip_nulls() {
        let rs = parse_price_json(
            r#"[{"Column1": "A", "2023": 300000}, null, {"Column1": "B"}]"#,
            "Column1",
        )
        .unwrap();
        assert_eq!(rs.len(), 2);
        assert_eq!(rs[0].value("2023"), Some(300000.0));
        assert!(rs[1].years.is_empty());
        assert!(parse_price_json(r#"{"Column1": "A"}"#, "Column1").is_err());
    }

    #[test]
    fn local_files_with_a_byte_order_mark_load() {
        let dir = tempfile::tempdir().unwrap();
        let prices = dir.path().join("prices.json");
        std::fs::write(&prices, "\u{feff}[{\"Column1\":\"A\",\"2023\":300000}]").unwrap();
        let rs = load_price_records(&Source::from(prices.as_path()), "Column1").unwrap();
        assert_eq!(rs[0].value("2023"), Some(300000.0));

        let csv = dir.path().join("prices.csv");
        std::fs::write(&csv, "\u{feff}Column1,2023\nA,300000\n").unwrap();
        let rs = load_price_records(&Source::from(csv.as_path()), "Column1").unwrap();
        assert_eq!(rs[0].name.as_deref(), Some("A"));

        let regions = dir.path().join("regions.json");
        std::fs::write(&regions, format!("\u{feff}{REGIONS}")).unwrap();
        let fs = load_features(&Source::from(regions.as_path()), &NameKey::property("EER13NM")).unwrap();
        assert_eq!(fs.len(), 2);
    }

    #[test]
    fn csv_prices_read_year_columns() {
        let rs = parse_price_csv("Column1,2017,2023\nA,250000,300000\nB,,\n", "Column1").unwrap();
        assert_eq!(rs.len(), 2);
        assert_eq!(rs[0].name.as_deref(), Some("A"));
        assert_eq!(rs[0].value("2017"), Some(250000.0));
        assert_eq!(rs[1].value("2023"), None);
        assert!(parse_price_csv("Region,2023\nA,1\n", "Column1").is_err());
    }
}
