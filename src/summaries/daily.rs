use std::collections::BTreeMap;

use crate::dataset::{Pollutant, Record};
use crate::summaries::types::{DailyPoint, SmoothedPoint};
use crate::summaries::utility::{mean_complete, mean_present};

/// Trailing moving-average window over the daily series.
pub const WINDOW_SIZE: usize = 5;

/// Mean pollutant reading per (year, day-number) group, ascending by year
/// then day-number.
///
/// The grouping key is the day NUMBER, not the full calendar date: readings
/// from e.g. Jan 5 and Feb 5 of one year land in the same group. That is
/// how the report has always bucketed its daily series and the downstream
/// axis is positional anyway, so the aliasing is kept as-is.
pub fn daily_means(records: &[Record], pollutant: Pollutant) -> Vec<DailyPoint> {
    let mut groups: BTreeMap<(i32, u32), Vec<Option<f64>>> = BTreeMap::new();

    for record in records {
        groups
            .entry((record.year, record.day))
            .or_default()
            .push(record.reading(pollutant));
    }

    groups
        .into_iter()
        .map(|((year, day), readings)| DailyPoint {
            year,
            day,
            value: mean_present(readings),
        })
        .collect()
}

/// Applies the trailing moving average and trims the warm-up region.
///
/// Each output point carries the mean of its own value and the 4 preceding
/// values; the first `WINDOW_SIZE - 1` input points have no full window and
/// are dropped outright. Output `step`s are renumbered densely from 1, so
/// the original day numbers do not survive this stage. A series shorter
/// than the window produces an empty output.
///
/// A window containing any missing value yields an undefined moving
/// average, which stays undefined through forecasting.
pub fn smooth(series: &[DailyPoint]) -> Vec<SmoothedPoint> {
    if series.len() < WINDOW_SIZE {
        return Vec::new();
    }

    series
        .windows(WINDOW_SIZE)
        .enumerate()
        .map(|(i, window)| {
            let values: Vec<Option<f64>> = window.iter().map(|p| p.value).collect();
            let point = &window[WINDOW_SIZE - 1];
            SmoothedPoint {
                year: point.year,
                step: i + 1,
                value: point.value,
                moving_average: mean_complete(&values),
            }
        })
        .collect()
}
