use crate::index::PriceIndex;
use crate::models::RegionFeature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How well a price table joined onto a map's regions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct JoinReport {
    pub regions: usize,
    pub matched: usize,
    /// Regions with no price for the map's year, sorted.
    pub unmatched_regions: Vec<String>,
    /// Priced names that match no region, sorted.
    pub unused_prices: Vec<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Join `features` against `index` by exact name and summarise the matched prices.
pub fn join_report(features: &[RegionFeature], index: &PriceIndex) -> JoinReport {
    let mut vals = Vec::new();
    let mut unmatched = BTreeSet::new();
    let mut seen = BTreeSet::new();
    for f in features {
        seen.insert(f.name.as_str());
        match index.get(&f.name) {
            Some(v) => vals.push(v),
            None => {
                unmatched.insert(f.name.clone());
            }
        }
    }
    let unused: BTreeSet<String> = index
        .names()
        .filter(|n| !seen.contains(n))
        .map(str::to_string)
        .collect();

    vals.sort_by(|a, b| a.total_cmp(b));
    let count = vals.len();
    let mean = if count > 0 {
        Some(vals.iter().copied().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    JoinReport {
        regions: features.len(),
        matched: count,
        unmatched_regions: unmatched.into_iter().collect(),
        unused_prices: unused.into_iter().collect(),
        min: vals.first().copied(),
        max: vals.last().copied(),
        mean,
        median,
    }
}
