use std::collections::BTreeMap;

use crate::dataset::{Pollutant, Record};
use crate::summaries::types::StationMeans;
use crate::summaries::utility::mean_present;

/// Per-station means of CO, PM2.5 and PM10 for the focus year, ascending by
/// station name.
pub fn station_means(records: &[Record], focus_year: i32) -> Vec<StationMeans> {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();

    for record in records {
        if record.year != focus_year {
            continue;
        }
        groups.entry(&record.station).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(station, rows)| StationMeans {
            station: station.to_string(),
            co: mean_present(rows.iter().map(|r| r.reading(Pollutant::Co))),
            pm25: mean_present(rows.iter().map(|r| r.reading(Pollutant::Pm25))),
            pm10: mean_present(rows.iter().map(|r| r.reading(Pollutant::Pm10))),
        })
        .collect()
}

/// Positions of the best (lowest PM2.5 mean) and worst (highest) stations.
///
/// Stations without a defined PM2.5 mean are not ranked. `None` when no
/// station has one.
pub fn extremes(stations: &[StationMeans]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, f64)> = None;
    let mut worst: Option<(usize, f64)> = None;

    for (i, s) in stations.iter().enumerate() {
        let Some(pm25) = s.pm25 else { continue };
        if best.is_none_or(|(_, v)| pm25 < v) {
            best = Some((i, pm25));
        }
        if worst.is_none_or(|(_, v)| pm25 > v) {
            worst = Some((i, pm25));
        }
    }

    match (best, worst) {
        (Some((b, _)), Some((w, _))) => Some((b, w)),
        _ => None,
    }
}
