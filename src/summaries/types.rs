//! Row types produced by the summary pipeline.

use serde::Serialize;

/// Mean of one pollutant over a whole year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyMean {
    pub year: i32,
    /// `None` when the year has no usable readings.
    pub mean: Option<f64>,
}

/// Month-over-month change of a pollutant mean within the focus year.
///
/// The delta for the focus year's first month is taken against the last
/// grouped month of the preceding year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyDelta {
    pub year: i32,
    pub month: u32,
    pub mean: Option<f64>,
    pub delta: Option<f64>,
}

/// Per-station pollutant means for the focus year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMeans {
    pub station: String,
    pub co: Option<f64>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
}

/// One untrimmed entry of the daily series: the mean pollutant reading over
/// every record sharing this (year, day-number) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub year: i32,
    pub day: u32,
    pub value: Option<f64>,
}

/// One entry of the smoothed daily series, real or forecast.
///
/// `step` is a dense 1-based position assigned after the warm-up region is
/// trimmed; the original day-number is discarded, so the chart axis is
/// purely positional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedPoint {
    pub year: i32,
    pub step: usize,
    pub value: Option<f64>,
    /// Mean of this value and the 4 preceding values of the untrimmed
    /// series. `None` when any value in the window was missing.
    pub moving_average: Option<f64>,
}

/// The four tables the report page is built from.
#[derive(Debug, Clone, Serialize)]
pub struct ReportTables {
    pub yearly_pm25: Vec<YearlyMean>,
    pub monthly_co_deltas: Vec<MonthlyDelta>,
    pub station_means: Vec<StationMeans>,
    /// Smoothed daily PM2.5 series with the forecast suffix appended.
    pub daily_pm25: Vec<SmoothedPoint>,
}
