use std::collections::BTreeMap;

use crate::dataset::{Pollutant, Record};
use crate::summaries::types::MonthlyDelta;
use crate::summaries::utility::mean_present;

/// Month-over-month deltas of a pollutant mean for the focus year.
///
/// Records from `focus_year - 1` and `focus_year` are grouped by
/// (year, month) in ascending order and each group's mean is differenced
/// against the previous group's. Running the chain through the preceding
/// year seeds the focus year's first month with a delta against the prior
/// December (or whatever the last grouped month of that year is). The very
/// first group has no predecessor and is dropped. Only focus-year rows are
/// returned.
pub fn monthly_deltas(
    records: &[Record],
    pollutant: Pollutant,
    focus_year: i32,
) -> Vec<MonthlyDelta> {
    let mut groups: BTreeMap<(i32, u32), Vec<Option<f64>>> = BTreeMap::new();

    for record in records {
        if record.year < focus_year - 1 || record.year > focus_year {
            continue;
        }
        groups
            .entry((record.year, record.month))
            .or_default()
            .push(record.reading(pollutant));
    }

    let means: Vec<((i32, u32), Option<f64>)> = groups
        .into_iter()
        .map(|(key, readings)| (key, mean_present(readings)))
        .collect();

    let mut deltas = Vec::new();
    for i in 1..means.len() {
        let ((year, month), mean) = means[i];
        if year != focus_year {
            continue;
        }
        let (_, previous) = means[i - 1];
        let delta = match (mean, previous) {
            (Some(current), Some(previous)) => Some(current - previous),
            _ => None,
        };
        deltas.push(MonthlyDelta {
            year,
            month,
            mean,
            delta,
        });
    }

    deltas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: u32, co: Option<f64>) -> Record {
        Record {
            year,
            month,
            day: 1,
            station: "A".to_string(),
            pm25: None,
            pm10: None,
            so2: None,
            no2: None,
            co,
            o3: None,
        }
    }

    #[test]
    fn test_delta_against_previous_month() {
        let records = vec![
            record(2016, 1, Some(1.0)),
            record(2016, 2, Some(1.5)),
            record(2016, 3, Some(1.2)),
        ];

        let deltas = monthly_deltas(&records, Pollutant::Co, 2016);

        // January has no predecessor and is dropped.
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].month, 2);
        assert_eq!(deltas[0].delta, Some(0.5));
        assert_eq!(deltas[1].month, 3);
        assert_eq!(deltas[1].delta, Some(1.2 - 1.5));
    }

    #[test]
    fn test_january_differences_against_prior_december() {
        let records = vec![
            record(2015, 12, Some(2.0)),
            record(2016, 1, Some(2.6)),
        ];

        let deltas = monthly_deltas(&records, Pollutant::Co, 2016);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].year, 2016);
        assert_eq!(deltas[0].month, 1);
        assert_eq!(deltas[0].delta, Some(2.6 - 2.0));
    }

    #[test]
    fn test_years_outside_window_ignored() {
        let records = vec![
            record(2014, 12, Some(9.0)),
            record(2016, 1, Some(1.0)),
            record(2016, 2, Some(2.0)),
            record(2017, 1, Some(9.0)),
        ];

        let deltas = monthly_deltas(&records, Pollutant::Co, 2016);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].month, 2);
        assert_eq!(deltas[0].delta, Some(1.0));
    }

    #[test]
    fn test_prior_year_rows_are_not_emitted() {
        let records = vec![
            record(2015, 11, Some(1.0)),
            record(2015, 12, Some(2.0)),
            record(2016, 1, Some(3.0)),
        ];

        let deltas = monthly_deltas(&records, Pollutant::Co, 2016);

        assert!(deltas.iter().all(|d| d.year == 2016));
        assert_eq!(deltas.len(), 1);
    }

    #[test]
    fn test_undefined_mean_poisons_adjacent_deltas() {
        let records = vec![
            record(2016, 1, Some(1.0)),
            record(2016, 2, None),
            record(2016, 3, Some(3.0)),
        ];

        let deltas = monthly_deltas(&records, Pollutant::Co, 2016);

        assert_eq!(deltas[0].month, 2);
        assert_eq!(deltas[0].delta, None);
        assert_eq!(deltas[1].month, 3);
        assert_eq!(deltas[1].delta, None);
    }

    #[test]
    fn test_empty_input() {
        assert!(monthly_deltas(&[], Pollutant::Co, 2016).is_empty());
    }
}
