use crate::summaries::daily::WINDOW_SIZE;
use crate::summaries::types::SmoothedPoint;
use crate::summaries::utility::mean_complete;

/// Number of future steps appended to the smoothed daily series.
pub const FORECAST_HORIZON: usize = 7;

/// Extends the smoothed series with `horizon` synthetic points.
///
/// Each iteration averages the `moving_average` of the last [`WINDOW_SIZE`]
/// points currently in the sequence (the whole sequence when it is shorter)
/// and appends the result as the next point, so earlier forecast points
/// feed later windows. The appended point carries the last point's year
/// unchanged and the next dense `step`; its value and moving average are
/// the same number.
///
/// An undefined moving average inside a tail window makes the appended
/// value undefined too, and that undefinedness compounds; callers decide
/// whether to render the gap or drop the forecast. An empty input has no
/// point to extend from and comes back empty.
pub fn extend_with_forecast(mut series: Vec<SmoothedPoint>, horizon: usize) -> Vec<SmoothedPoint> {
    if series.is_empty() {
        return series;
    }

    for _ in 0..horizon {
        let tail_start = series.len().saturating_sub(WINDOW_SIZE);
        let tail: Vec<Option<f64>> = series[tail_start..]
            .iter()
            .map(|p| p.moving_average)
            .collect();
        let next = mean_complete(&tail);

        let last = series.last().unwrap();
        series.push(SmoothedPoint {
            year: last.year,
            step: last.step + 1,
            value: next,
            moving_average: next,
        });
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoothed(step: usize, moving_average: f64) -> SmoothedPoint {
        SmoothedPoint {
            year: 2016,
            step,
            value: Some(moving_average),
            moving_average: Some(moving_average),
        }
    }

    fn series_30_to_70() -> Vec<SmoothedPoint> {
        [30.0, 40.0, 50.0, 60.0, 70.0]
            .iter()
            .enumerate()
            .map(|(i, ma)| smoothed(i + 1, *ma))
            .collect()
    }

    #[test]
    fn test_appends_exactly_horizon_points() {
        for len in 1..=8 {
            let series: Vec<SmoothedPoint> =
                (1..=len).map(|i| smoothed(i, i as f64)).collect();
            let extended = extend_with_forecast(series, FORECAST_HORIZON);
            assert_eq!(extended.len(), len + FORECAST_HORIZON);
        }
    }

    #[test]
    fn test_recursive_extrapolation_values() {
        let extended = extend_with_forecast(series_30_to_70(), 3);

        assert_eq!(extended.len(), 8);
        // tail [30,40,50,60,70] -> 50
        assert_eq!(extended[5].value, Some(50.0));
        assert_eq!(extended[5].step, 6);
        // tail [40,50,60,70,50] -> 54
        assert_eq!(extended[6].value, Some(54.0));
        // tail [50,60,70,50,54] -> 56.8
        assert_eq!(extended[7].value, Some(56.8));
    }

    #[test]
    fn test_forecast_point_shape() {
        let extended = extend_with_forecast(series_30_to_70(), 1);

        let p = &extended[5];
        assert_eq!(p.year, 2016);
        assert_eq!(p.step, 6);
        assert_eq!(p.value, p.moving_average);
    }

    #[test]
    fn test_short_series_uses_whole_tail() {
        let series = vec![smoothed(1, 10.0), smoothed(2, 20.0)];

        let extended = extend_with_forecast(series, 1);

        assert_eq!(extended.len(), 3);
        assert_eq!(extended[2].value, Some(15.0));
    }

    #[test]
    fn test_single_point_series() {
        let extended = extend_with_forecast(vec![smoothed(1, 42.0)], 2);

        assert_eq!(extended.len(), 3);
        assert_eq!(extended[1].value, Some(42.0));
        assert_eq!(extended[2].value, Some(42.0));
    }

    #[test]
    fn test_empty_series_stays_empty() {
        assert!(extend_with_forecast(Vec::new(), FORECAST_HORIZON).is_empty());
    }

    #[test]
    fn test_undefined_moving_average_poisons_forecast() {
        let mut series = series_30_to_70();
        series[4].moving_average = None;

        let extended = extend_with_forecast(series, 3);

        assert_eq!(extended.len(), 8);
        assert_eq!(extended[5].value, None);
        // The poisoned forecast point sits in every later tail window.
        assert_eq!(extended[6].value, None);
        assert_eq!(extended[7].value, None);
    }

    #[test]
    fn test_deterministic() {
        let a = extend_with_forecast(series_30_to_70(), FORECAST_HORIZON);
        let b = extend_with_forecast(series_30_to_70(), FORECAST_HORIZON);
        assert_eq!(a, b);
    }
}
