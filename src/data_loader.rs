//! Data loader module for reading city trip files
//!
//! Each supported city maps to a fixed CSV file inside the data directory.
//! The loader reads every record, parses the start time, derives the
//! month / day-of-week / hour columns, and applies the month and day
//! filters of a [`FilterSelection`].
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::data_loader::DataLoader;
//! use bikeshare_core::{City, FilterSelection};
//!
//! # fn example() -> bikeshare::Result<()> {
//! let loader = DataLoader::new("data");
//! let table = loader.load(&FilterSelection::unrestricted(City::Chicago))?;
//! println!("Loaded {} trips", table.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{BikeshareError, Result};
use bikeshare_core::{City, FilterSelection, TableColumns, Trip, TripTable};
use chrono::NaiveDateTime;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const REQUIRED_COLUMNS: [&str; 4] = [START_TIME, START_STATION, END_STATION, TRIP_DURATION];

const BIRTH_YEARS: std::ops::RangeInclusive<f64> = 1800.0..=2100.0;

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// One CSV record as written in the file
///
/// Optional columns deserialize to `None` both when the column is absent
/// and when the cell is empty.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Parse a start/end time value
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (optionally with fractional seconds or a
/// `T` separator) and `YYYY-MM-DD HH:MM`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
}

/// Loader for the per-city CSV files
pub struct DataLoader {
    data_dir: PathBuf,
    show_progress: bool,
}

impl DataLoader {
    /// Create a loader reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            show_progress: false,
        }
    }

    /// Show a spinner while records are read
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Path of the file backing `city`
    pub fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    /// Load a city's trips and apply the selection's month and day filters
    ///
    /// A selection that matches nothing yields an empty table, not an error.
    pub fn load(&self, selection: &FilterSelection) -> Result<TripTable> {
        let mut table = self.load_city(selection.city)?;
        let filter = selection.filter();

        if !filter.is_unrestricted() {
            let dropped = table.retain(&filter);
            info!(
                "Filtered {} trips down to {} ({})",
                table.len() + dropped,
                table.len(),
                selection
            );
        }

        Ok(table)
    }

    /// Load every trip for `city` without filtering
    ///
    /// # Errors
    ///
    /// - [`BikeshareError::DatasetNotFound`] if the city's file is missing
    /// - [`BikeshareError::MissingColumn`] if a required column is absent
    /// - [`BikeshareError::InvalidTimestamp`] if a start time cannot be parsed
    pub fn load_city(&self, city: City) -> Result<TripTable> {
        let path = self.path_for(city);
        if !path.is_file() {
            return Err(BikeshareError::DatasetNotFound { city, path });
        }

        debug!("Reading {}", path.display());
        let file = File::open(&path)?;

        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} trips read")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Loading {city} data"));
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let result = Self::read_trips(file, &path, progress.as_ref());

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let table = result?;
        info!("Loaded {} trips from {}", table.len(), path.display());
        Ok(table)
    }

    /// Read trips from any CSV source
    ///
    /// `source` only labels errors.
    pub fn read_trips<R: Read>(
        reader: R,
        source: &Path,
        progress: Option<&ProgressBar>,
    ) -> Result<TripTable> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let has = |name: &str| headers.iter().any(|h| h == name);

        for column in REQUIRED_COLUMNS {
            if !has(column) {
                return Err(BikeshareError::MissingColumn {
                    file: source.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        let columns = TableColumns {
            end_time: has(END_TIME),
            user_type: has(USER_TYPE),
            gender: has(GENDER),
            birth_year: has(BIRTH_YEAR),
        };
        debug!(?columns, "Detected optional columns");

        let mut trips = Vec::new();
        for (row_id, record) in reader.records().enumerate() {
            let record = record?;
            let raw: RawTrip = record.deserialize(Some(&headers))?;

            let line = record.position().map_or(0, |p| p.line());
            let start_time = parse_timestamp(&raw.start_time).ok_or_else(|| {
                BikeshareError::InvalidTimestamp {
                    file: source.to_path_buf(),
                    line,
                    value: raw.start_time.clone(),
                }
            })?;
            let birth_year = match raw.birth_year {
                Some(year) if !BIRTH_YEARS.contains(&year) => {
                    return Err(BikeshareError::InvalidValue {
                        file: source.to_path_buf(),
                        line,
                        column: BIRTH_YEAR.to_string(),
                        value: year.to_string(),
                    });
                }
                year => year.map(|year| year.round() as i32),
            };

            let mut trip = Trip::new(
                row_id,
                start_time,
                raw.start_station,
                raw.end_station,
                raw.trip_duration,
            );
            trip.end_time = raw.end_time;
            trip.user_type = raw.user_type;
            trip.gender = raw.gender;
            trip.birth_year = birth_year;
            trips.push(trip);

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        Ok(TripTable::new(trips, columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::Month;
    use chrono::{Timelike, Weekday};
    use tempfile::TempDir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,Male,1981.0
304487,2017-03-06 13:49:38,2017-03-06 13:55:28,350,Christiana Ave & Lawrence Ave,St. Louis Ave & Balmoral Ave,Subscriber,,
";

    fn read(csv: &str) -> Result<TripTable> {
        DataLoader::read_trips(csv.as_bytes(), Path::new("test.csv"), None)
    }

    #[test]
    fn test_read_trips() {
        let table = read(CHICAGO).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.columns(), TableColumns::all());

        let first = &table.trips()[0];
        assert_eq!(first.row_id, 0);
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.month, 6);
        assert_eq!(first.day_of_week, Weekday::Fri);
        assert_eq!(first.hour, 15);
        assert_eq!(first.birth_year, Some(1992));

        let last = &table.trips()[3];
        assert_eq!(last.gender, None);
        assert_eq!(last.birth_year, None);
    }

    #[test]
    fn test_optional_columns_absent() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station
2017-01-01 00:07:57,1000.0,A St,B St
";
        let table = read(csv).unwrap();
        assert_eq!(table.columns(), TableColumns::default());
        assert_eq!(table.trips()[0].user_type, None);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Start Time,Trip Duration,Start Station\n2017-01-01 00:07:57,1,A\n";
        match read(csv) {
            Err(BikeshareError::MissingColumn { column, .. }) => {
                assert_eq!(column, END_STATION)
            }
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_timestamp() {
        let csv = "\
Start Time,Trip Duration,Start Station,End Station
2017-01-01 00:07:57,10,A,B
last tuesday,10,A,B
";
        match read(csv) {
            Err(BikeshareError::InvalidTimestamp { line, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "last tuesday");
            }
            other => panic!("Expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_unusable_birth_year() {
        for bad in ["NaN", "1e12", "-inf"] {
            let csv = format!(
                "Start Time,Trip Duration,Start Station,End Station,Birth Year\n\
                 2017-01-01 00:07:57,10,A,B,1985.0\n\
                 2017-01-02 00:07:57,10,A,B,{bad}\n"
            );
            match read(&csv) {
                Err(BikeshareError::InvalidValue {
                    line, column, ..
                }) => {
                    assert_eq!(line, 3);
                    assert_eq!(column, BIRTH_YEAR);
                }
                other => panic!("Expected InvalidValue for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2017-01-01 00:07:57").is_some());
        assert!(parse_timestamp("2017-01-01T00:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 00:07:57.250").is_some());
        assert_eq!(parse_timestamp("2017-01-01 09:30").unwrap().hour(), 9);
        assert!(parse_timestamp("01/01/2017").is_none());
    }

    #[test]
    fn test_load_applies_selection() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
        let loader = DataLoader::new(dir.path());

        let june = FilterSelection {
            city: City::Chicago,
            month: Some(Month::June),
            day: None,
        };
        let table = loader.load(&june).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.trips()[0].row_id, 0);

        let all = loader
            .load(&FilterSelection::unrestricted(City::Chicago))
            .unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_missing_dataset() {
        let dir = TempDir::new().unwrap();
        let loader = DataLoader::new(dir.path());
        let result = loader.load_city(City::Washington);
        assert!(matches!(
            result,
            Err(BikeshareError::DatasetNotFound {
                city: City::Washington,
                ..
            })
        ));
    }
}
