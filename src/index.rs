use crate::models::PriceRecord;
use std::collections::HashMap;

/// Region name → price for one year column. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceIndex {
    year: String,
    prices: HashMap<String, f64>,
}

impl PriceIndex {
    /// Select `year` from every record that has a name and a value for it.
    /// Records without the year are skipped; on duplicate names the last record wins.
    pub fn build(records: &[PriceRecord], year: &str) -> Self {
        let prices: HashMap<String, f64> = records
            .iter()
            .filter_map(|r| Some((r.name.clone()?, r.value(year)?)))
            .collect();
        log::debug!("price index for {year}: {} of {} records", prices.len(), records.len());
        Self {
            year: year.to_string(),
            prices,
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.prices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }
}
