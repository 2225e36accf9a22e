//! The four charts of the report page.
//!
//! Every function draws into a caller-provided sub-area and is generic over
//! the backend so tests can render into an in-memory bitmap. Sections whose
//! table carries no drawable point render as an annotated empty panel
//! instead of failing the whole page.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::warn;

use crate::report::style::{
    ACCENT_BLUE, ACCENT_RED, FORECAST_PURPLE, NEUTRAL_GREY, TEXT_GREY,
};
use crate::summaries::stations;
use crate::summaries::types::{MonthlyDelta, SmoothedPoint, StationMeans, YearlyMean};

const CHART_CAPTION_FONT: (&str, i32) = ("sans-serif", 22);

/// Section (a): mean PM2.5 per year, as a marked line.
pub fn yearly_chart<DB>(area: &DrawingArea<DB, Shift>, rows: &[YearlyMean]) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let points: Vec<(i32, f64)> = rows
        .iter()
        .filter_map(|r| r.mean.map(|m| (r.year, m)))
        .collect();

    let Some((y_lo, y_hi)) = padded_range(points.iter().map(|(_, v)| *v)) else {
        return empty_panel(area, "Mean PM2.5 by Year");
    };
    let first_year = points[0].0;
    let last_year = points[points.len() - 1].0;

    let mut chart = ChartBuilder::on(area)
        .caption("Mean PM2.5 by Year", CHART_CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first_year..last_year + 1, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(points.len())
        .x_label_formatter(&|year| year.to_string())
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &ACCENT_RED))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, ACCENT_RED.filled())),
    )?;

    Ok(())
}

/// Section (b): month-over-month CO delta bars, colored by sign.
pub fn monthly_delta_chart<DB>(
    area: &DrawingArea<DB, Shift>,
    rows: &[MonthlyDelta],
    focus_year: i32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let caption = format!("CO Delta by Month in {focus_year}");
    let deltas: Vec<f64> = rows.iter().filter_map(|r| r.delta).collect();
    if deltas.is_empty() {
        return empty_panel(area, &caption);
    }
    let (y_lo, y_hi) = bar_range(&deltas);

    let mut chart = ChartBuilder::on(area)
        .caption(caption.as_str(), CHART_CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..rows.len() as u32).into_segmented(), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => rows
                .get(*i as usize)
                .map(|r| r.month.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(rows.iter().enumerate().filter_map(|(i, row)| {
        let delta = row.delta?;
        let color = if delta < 0.0 { ACCENT_BLUE } else { ACCENT_RED };
        Some(bar(i, delta, color))
    }))?;

    Ok(())
}

/// Section (c): PM2.5 mean per station, best and worst highlighted.
pub fn station_chart<DB>(
    area: &DrawingArea<DB, Shift>,
    rows: &[StationMeans],
    focus_year: i32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let caption = format!("PM2.5 by Station in {focus_year}");
    let means: Vec<f64> = rows.iter().filter_map(|r| r.pm25).collect();
    if means.is_empty() {
        return empty_panel(area, &caption);
    }
    let (y_lo, y_hi) = bar_range(&means);
    let highlight = stations::extremes(rows);

    let mut chart = ChartBuilder::on(area)
        .caption(caption.as_str(), CHART_CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..rows.len() as u32).into_segmented(), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => rows
                .get(*i as usize)
                .map(|r| r.station.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .label_style(("sans-serif", 11))
        .draw()?;

    chart.draw_series(rows.iter().enumerate().filter_map(|(i, row)| {
        let mean = row.pm25?;
        let color = match highlight {
            Some((best, _)) if best == i => ACCENT_BLUE,
            Some((_, worst)) if worst == i => ACCENT_RED,
            _ => NEUTRAL_GREY,
        };
        Some(bar(i, mean, color))
    }))?;

    Ok(())
}

/// Section (d): the smoothed daily series split into an observed prefix and
/// a forecast suffix at `len - horizon`.
pub fn forecast_chart<DB>(
    area: &DrawingArea<DB, Shift>,
    series: &[SmoothedPoint],
    horizon: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let caption = format!("PM2.5 Forecast for {horizon} Days");
    let values: Vec<f64> = series.iter().filter_map(|p| p.value).collect();
    let Some((y_lo, y_hi)) = padded_range(values.into_iter()) else {
        return empty_panel(area, &caption);
    };

    let split = series.len().saturating_sub(horizon);
    let observed = &series[..split];
    let forecast = &series[split..];
    if forecast.iter().any(|p| p.value.is_none()) {
        warn!("Forecast contains undefined values; rendering them as gaps");
    }

    let x_hi = series.last().map(|p| p.step as i32).unwrap_or(1) + 1;
    let mut chart = ChartBuilder::on(area)
        .caption(caption.as_str(), CHART_CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_hi, y_lo..y_hi)?;

    chart.configure_mesh().disable_x_mesh().draw()?;

    let mut labeled = false;
    for run in defined_runs(observed) {
        let anno = chart.draw_series(LineSeries::new(run.into_iter(), &NEUTRAL_GREY))?;
        if !labeled {
            anno.label("Original Data").legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], NEUTRAL_GREY)
            });
            labeled = true;
        }
    }

    let mut labeled = false;
    for run in defined_runs(forecast) {
        let points = run.clone();
        let anno = chart.draw_series(LineSeries::new(run.into_iter(), &FORECAST_PURPLE))?;
        if !labeled {
            anno.label("Moving Average Forecast").legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], FORECAST_PURPLE)
            });
            labeled = true;
        }
        chart.draw_series(
            points
                .into_iter()
                .map(|(x, y)| Circle::new((x, y), 3, FORECAST_PURPLE.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// One bar of a segmented-axis bar chart, with a small horizontal inset so
/// adjacent bars do not touch.
fn bar(index: usize, value: f64, color: RGBColor) -> Rectangle<(SegmentValue<u32>, f64)> {
    let mut rect = Rectangle::new(
        [
            (SegmentValue::Exact(index as u32), 0.0),
            (SegmentValue::Exact(index as u32 + 1), value),
        ],
        color.filled(),
    );
    rect.set_margin(0, 0, 3, 3);
    rect
}

/// Splits the series into runs of consecutive defined points so undefined
/// values show up as gaps in the line rather than being bridged.
fn defined_runs(series: &[SmoothedPoint]) -> Vec<Vec<(i32, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for point in series {
        match point.value {
            Some(v) => current.push((point.step as i32, v)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// Y range padded by 10% on each side, collapsing to a unit band around a
/// constant series. `None` when there is nothing to plot.
fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        return None;
    }
    let pad = if (hi - lo).abs() > 1e-9 {
        (hi - lo) * 0.1
    } else {
        1.0
    };
    Some((lo - pad, hi + pad))
}

/// Y range for bars: always spans the zero baseline.
fn bar_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = padded_range(values.iter().copied()).unwrap_or((0.0, 1.0));
    (lo.min(0.0), hi.max(0.0))
}

/// Fallback panel for a section with no drawable data.
fn empty_panel<DB>(area: &DrawingArea<DB, Shift>, caption: &str) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    warn!(section = caption, "No drawable data for report section");
    area.draw(&Text::new(
        format!("{caption} (no data)"),
        (20, 30),
        ("sans-serif", 18).into_font().color(&TEXT_GREY),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoothed(step: usize, value: Option<f64>) -> SmoothedPoint {
        SmoothedPoint {
            year: 2016,
            step,
            value,
            moving_average: value,
        }
    }

    #[test]
    fn test_defined_runs_splits_on_gaps() {
        let series = vec![
            smoothed(1, Some(1.0)),
            smoothed(2, Some(2.0)),
            smoothed(3, None),
            smoothed(4, Some(4.0)),
        ];

        let runs = defined_runs(&series);

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(1, 1.0), (2, 2.0)]);
        assert_eq!(runs[1], vec![(4, 4.0)]);
    }

    #[test]
    fn test_defined_runs_all_missing() {
        let series = vec![smoothed(1, None), smoothed(2, None)];
        assert!(defined_runs(&series).is_empty());
    }

    #[test]
    fn test_padded_range_pads_both_sides() {
        let (lo, hi) = padded_range([10.0, 20.0].into_iter()).unwrap();
        assert_eq!(lo, 9.0);
        assert_eq!(hi, 21.0);
    }

    #[test]
    fn test_padded_range_constant_series() {
        let (lo, hi) = padded_range([5.0, 5.0].into_iter()).unwrap();
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn test_padded_range_empty() {
        assert_eq!(padded_range(std::iter::empty()), None);
    }

    #[test]
    fn test_bar_range_spans_zero() {
        let (lo, hi) = bar_range(&[3.0, 8.0]);
        assert!(lo <= 0.0);
        assert!(hi >= 8.0);

        let (lo, hi) = bar_range(&[-4.0, -1.0]);
        assert!(lo <= -4.0);
        assert!(hi >= 0.0);
    }
}
