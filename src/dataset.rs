//! Loading of the air-quality measurement dataset.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One observation row deserialized from the input CSV.
///
/// Pollutant cells may be empty in the source data; they deserialize to
/// `None` and stay that way through every downstream stage.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub station: String,

    #[serde(rename = "PM2.5")]
    pub pm25: Option<f64>,
    #[serde(rename = "PM10")]
    pub pm10: Option<f64>,
    #[serde(rename = "SO2")]
    pub so2: Option<f64>,
    #[serde(rename = "NO2")]
    pub no2: Option<f64>,
    #[serde(rename = "CO")]
    pub co: Option<f64>,
    #[serde(rename = "O3")]
    pub o3: Option<f64>,
}

/// Selects one pollutant column of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
}

impl Pollutant {
    /// Column header / display name, as it appears in the source CSV.
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }
}

impl Record {
    /// Returns the reading for the given pollutant, if present.
    pub fn reading(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::So2 => self.so2,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }
}

/// Loads every record from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row fails to
/// deserialize. A broken dataset aborts the run before any computation.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: Record =
            result.with_context(|| format!("malformed row in {}", path.display()))?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_csv(data: &str) -> Vec<Record> {
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        rdr.deserialize().collect::<Result<_, _>>().unwrap()
    }

    const HEADER: &str = "year,month,day,station,PM2.5,PM10,SO2,NO2,CO,O3\n";

    #[test]
    fn test_deserialize_full_row() {
        let rows = read_csv(&format!(
            "{HEADER}2016,3,5,Aotizhongxin,12.5,30.0,4.0,20.0,0.8,60.0\n"
        ));

        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.year, 2016);
        assert_eq!(r.month, 3);
        assert_eq!(r.day, 5);
        assert_eq!(r.station, "Aotizhongxin");
        assert_eq!(r.pm25, Some(12.5));
        assert_eq!(r.co, Some(0.8));
    }

    #[test]
    fn test_empty_cells_deserialize_to_none() {
        let rows = read_csv(&format!("{HEADER}2016,3,5,Dingling,,30.0,,,0.8,\n"));

        let r = &rows[0];
        assert_eq!(r.pm25, None);
        assert_eq!(r.pm10, Some(30.0));
        assert_eq!(r.so2, None);
        assert_eq!(r.o3, None);
    }

    #[test]
    fn test_reading_selects_column() {
        let rows = read_csv(&format!(
            "{HEADER}2016,1,1,Dingling,10.0,20.0,3.0,40.0,0.5,6.0\n"
        ));
        let r = &rows[0];

        assert_eq!(r.reading(Pollutant::Pm25), Some(10.0));
        assert_eq!(r.reading(Pollutant::Pm10), Some(20.0));
        assert_eq!(r.reading(Pollutant::So2), Some(3.0));
        assert_eq!(r.reading(Pollutant::No2), Some(40.0));
        assert_eq!(r.reading(Pollutant::Co), Some(0.5));
        assert_eq!(r.reading(Pollutant::O3), Some(6.0));
    }

    #[test]
    fn test_pollutant_labels() {
        assert_eq!(Pollutant::Pm25.label(), "PM2.5");
        assert_eq!(Pollutant::Co.label(), "CO");
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = load_records(Path::new("/nonexistent/air.csv"));
        assert!(result.is_err());
    }
}
