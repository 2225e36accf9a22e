use std::collections::BTreeMap;

use crate::dataset::{Pollutant, Record};
use crate::summaries::types::YearlyMean;
use crate::summaries::utility::mean_present;

/// Mean of one pollutant per year, ascending by year.
pub fn yearly_means(records: &[Record], pollutant: Pollutant) -> Vec<YearlyMean> {
    let mut groups: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();

    for record in records {
        groups
            .entry(record.year)
            .or_default()
            .push(record.reading(pollutant));
    }

    groups
        .into_iter()
        .map(|(year, readings)| YearlyMean {
            year,
            mean: mean_present(readings),
        })
        .collect()
}
