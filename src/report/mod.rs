//! Report page assembly.
//!
//! Renders the four summary tables onto a single SVG page: a header, one
//! chart section per table, and a dated caption line.

pub mod charts;
pub mod style;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use plotters::prelude::*;
use tracing::info;

use crate::report::style::TEXT_GREY;
use crate::summaries::ReportOptions;
use crate::summaries::forecast::FORECAST_HORIZON;
use crate::summaries::types::ReportTables;

const PAGE_WIDTH: u32 = 1024;
const PAGE_HEIGHT: u32 = 1880;
const CAPTION_HEIGHT: i32 = 50;

/// Renders the full report page to an SVG file.
pub fn render_report(path: &Path, tables: &ReportTables, opts: &ReportOptions) -> Result<()> {
    let root = SVGBackend::new(path, (PAGE_WIDTH, PAGE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let page = root.titled("Air Quality Report", ("sans-serif", 40))?;
    let body_height = page.dim_in_pixel().1 as i32 - CAPTION_HEIGHT;
    let (body, caption) = page.split_vertically(body_height);

    let sections = body.split_evenly((4, 1));
    charts::yearly_chart(&sections[0], &tables.yearly_pm25)?;
    charts::monthly_delta_chart(&sections[1], &tables.monthly_co_deltas, opts.focus_year)?;
    charts::station_chart(&sections[2], &tables.station_means, opts.focus_year)?;
    charts::forecast_chart(&sections[3], &tables.daily_pm25, FORECAST_HORIZON)?;

    caption.draw(&Text::new(
        format!(
            "Air quality summary report, generated {}",
            Utc::now().format("%Y-%m-%d")
        ),
        (20, 16),
        ("sans-serif", 16).into_font().color(&TEXT_GREY),
    ))?;

    root.present()
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!(path = %path.display(), "Report page rendered");

    Ok(())
}
