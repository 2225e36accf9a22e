//! Summary computation over the loaded record set.
//!
//! This module derives the four tables the report page is built from:
//! yearly PM2.5 means, monthly CO deltas for the focus year, per-station
//! pollutant means, and the smoothed daily PM2.5 series extended by a
//! moving-average forecast.

pub mod daily;
pub mod forecast;
pub mod monthly;
pub mod stations;
pub mod types;
pub mod utility;
pub mod yearly;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::dataset::{Pollutant, Record};
use crate::summaries::forecast::FORECAST_HORIZON;
use crate::summaries::types::ReportTables;

/// Parameters of one report run.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Year the monthly-delta and station summaries report on.
    pub focus_year: i32,
    /// Inclusive lower date bound applied to the record set, if any.
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper date bound applied to the record set, if any.
    pub to_date: Option<NaiveDate>,
}

impl ReportOptions {
    fn has_date_filter(&self) -> bool {
        self.from_date.is_some() || self.to_date.is_some()
    }
}

/// Computes all four summary tables from the record set.
///
/// Pure with respect to its inputs: the same records and options always
/// produce the same tables.
pub fn build_tables(records: &[Record], opts: &ReportOptions) -> ReportTables {
    let filtered;
    let records = if opts.has_date_filter() {
        filtered = filter_by_date(records, opts);
        &filtered[..]
    } else {
        records
    };

    let daily = daily::daily_means(records, Pollutant::Pm25);
    let smoothed = daily::smooth(&daily);
    debug!(
        daily_points = daily.len(),
        smoothed_points = smoothed.len(),
        "Daily series aggregated"
    );

    ReportTables {
        yearly_pm25: yearly::yearly_means(records, Pollutant::Pm25),
        monthly_co_deltas: monthly::monthly_deltas(records, Pollutant::Co, opts.focus_year),
        station_means: stations::station_means(records, opts.focus_year),
        daily_pm25: forecast::extend_with_forecast(smoothed, FORECAST_HORIZON),
    }
}

/// Keeps the records whose calendar date falls inside the configured bounds.
///
/// Only runs when a bound is set. Rows whose (year, month, day) columns do
/// not form a valid date cannot be compared against the bounds and are
/// dropped.
fn filter_by_date(records: &[Record], opts: &ReportOptions) -> Vec<Record> {
    let mut invalid = 0usize;
    let kept: Vec<Record> = records
        .iter()
        .filter(|r| {
            let Some(date) = NaiveDate::from_ymd_opt(r.year, r.month, r.day) else {
                invalid += 1;
                return false;
            };
            opts.from_date.is_none_or(|from| date >= from)
                && opts.to_date.is_none_or(|to| date <= to)
        })
        .cloned()
        .collect();

    if invalid > 0 {
        warn!(invalid, "Dropped rows without a valid calendar date");
    }
    debug!(kept = kept.len(), total = records.len(), "Date filter applied");

    kept
}
