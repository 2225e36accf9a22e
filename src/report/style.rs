//! Palette of the report page.

use plotters::style::RGBColor;

/// Accent for rising deltas, worst-station bars and the yearly trend line.
pub const ACCENT_RED: RGBColor = RGBColor(0xb8, 0x3f, 0x35);

/// Accent for falling deltas and the best-station bar.
pub const ACCENT_BLUE: RGBColor = RGBColor(0x46, 0x8a, 0xe3);

/// Observed-data segment of the forecast chart and unranked station bars.
pub const NEUTRAL_GREY: RGBColor = RGBColor(0xd3, 0xd3, 0xd3);

/// Forecast segment of the daily series chart.
pub const FORECAST_PURPLE: RGBColor = RGBColor(0x49, 0x12, 0x73);

/// Caption and placeholder text.
pub const TEXT_GREY: RGBColor = RGBColor(0x69, 0x69, 0x69);
